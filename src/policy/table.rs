//! Policy table: move-sets per board state, grouped by outcome class

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, hash_map::Entry},
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use super::outcome::OutcomeClass;
use crate::{
    Result,
    error::Error,
    tictactoe::BoardState,
    types::{BoardKey, Position},
};

/// Classified moves for one board state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyEntry {
    classification: Option<OutcomeClass>,
    win: BTreeSet<Position>,
    draw: BTreeSet<Position>,
    loss: BTreeSet<Position>,
}

impl PolicyEntry {
    /// Record `pos` under `class`.
    pub fn record(&mut self, pos: Position, class: OutcomeClass) {
        self.moves_mut(class).insert(pos);
    }

    pub(crate) fn set_classification(&mut self, class: OutcomeClass) {
        self.classification = Some(class);
    }

    /// Value of this state for the player to move.
    ///
    /// Entries built by the trainer always carry one; a hand-built entry that
    /// was never classified reports [`OutcomeClass::Draw`].
    pub fn classification(&self) -> OutcomeClass {
        self.classification.unwrap_or(OutcomeClass::Draw)
    }

    /// Moves recorded under `class`
    pub fn moves(&self, class: OutcomeClass) -> &BTreeSet<Position> {
        match class {
            OutcomeClass::Win => &self.win,
            OutcomeClass::Draw => &self.draw,
            OutcomeClass::Loss => &self.loss,
        }
    }

    fn moves_mut(&mut self, class: OutcomeClass) -> &mut BTreeSet<Position> {
        match class {
            OutcomeClass::Win => &mut self.win,
            OutcomeClass::Draw => &mut self.draw,
            OutcomeClass::Loss => &mut self.loss,
        }
    }

    /// The best non-losing move-set: winning moves if any, else drawing moves.
    pub fn playable_moves(&self) -> Option<(OutcomeClass, &BTreeSet<Position>)> {
        [OutcomeClass::Win, OutcomeClass::Draw]
            .into_iter()
            .map(|class| (class, self.moves(class)))
            .find(|(_, moves)| !moves.is_empty())
    }

    /// Class recorded for a single move, if any
    pub fn class_of(&self, pos: Position) -> Option<OutcomeClass> {
        OutcomeClass::ALL
            .into_iter()
            .find(|&class| self.moves(class).contains(&pos))
    }

    /// Every recorded move with its class, in class then row-major order
    pub fn classified_moves(&self) -> impl Iterator<Item = (Position, OutcomeClass)> + '_ {
        OutcomeClass::ALL
            .into_iter()
            .flat_map(move |class| self.moves(class).iter().map(move |&pos| (pos, class)))
    }

    /// Total number of recorded moves across all classes
    pub fn move_count(&self) -> usize {
        self.win.len() + self.draw.len() + self.loss.len()
    }
}

/// Entry counts per classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub entries: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

/// Index from raw board serialization to classified moves.
///
/// Built once by [`Trainer`](super::Trainer) and read-only afterwards, so it can
/// be shared across sessions behind an `Arc` without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyTable {
    entries: HashMap<BoardKey, PolicyEntry>,
}

impl PolicyTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn entry(&mut self, key: BoardKey) -> Entry<'_, BoardKey, PolicyEntry> {
        self.entries.entry(key)
    }

    pub(crate) fn get(&self, key: &BoardKey) -> Option<&PolicyEntry> {
        self.entries.get(key)
    }

    /// Entry for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UntrainedState`] if the trainer never keyed this state.
    pub fn lookup(&self, state: &BoardState) -> Result<&PolicyEntry> {
        let key = state.key();
        self.entries
            .get(&key)
            .ok_or_else(|| Error::UntrainedState {
                key: key.into_string(),
            })
    }

    /// Classification of `state` for the player to move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UntrainedState`] if the trainer never keyed this state.
    pub fn classification(&self, state: &BoardState) -> Result<OutcomeClass> {
        self.lookup(state).map(PolicyEntry::classification)
    }

    pub fn contains(&self, state: &BoardState) -> bool {
        self.entries.contains_key(&state.key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BoardKey, &PolicyEntry)> {
        self.entries.iter()
    }

    /// Count entries by their classification
    pub fn summary(&self) -> TableSummary {
        let mut summary = TableSummary {
            entries: self.entries.len(),
            ..TableSummary::default()
        };
        for entry in self.entries.values() {
            match entry.classification() {
                OutcomeClass::Win => summary.wins += 1,
                OutcomeClass::Draw => summary.draws += 1,
                OutcomeClass::Loss => summary.losses += 1,
            }
        }
        summary
    }

    /// Write the table as pretty JSON, keys sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let sorted: BTreeMap<&str, &PolicyEntry> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.as_str(), entry))
            .collect();
        let export = TableExport {
            summary: self.summary(),
            entries: sorted,
        };
        serde_json::to_writer_pretty(writer, &export)?;
        Ok(())
    }

    /// Dump the table to a JSON file for inspection.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("write {}", path.display()),
            source,
        })?;
        Ok(())
    }
}

#[derive(Serialize)]
struct TableExport<'a> {
    summary: TableSummary,
    entries: BTreeMap<&'a str, &'a PolicyEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn playable_moves_prefers_wins_then_draws() {
        let mut entry = PolicyEntry::default();
        entry.record(pos(0, 0), OutcomeClass::Loss);
        assert!(entry.playable_moves().is_none());

        entry.record(pos(1, 1), OutcomeClass::Draw);
        let (class, moves) = entry.playable_moves().unwrap();
        assert_eq!(class, OutcomeClass::Draw);
        assert!(moves.contains(&pos(1, 1)));

        entry.record(pos(2, 2), OutcomeClass::Win);
        let (class, moves) = entry.playable_moves().unwrap();
        assert_eq!(class, OutcomeClass::Win);
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn classified_moves_lists_each_move_once() {
        let mut entry = PolicyEntry::default();
        entry.record(pos(0, 1), OutcomeClass::Draw);
        entry.record(pos(0, 0), OutcomeClass::Win);
        entry.record(pos(2, 2), OutcomeClass::Loss);

        let listed: Vec<_> = entry.classified_moves().collect();
        assert_eq!(
            listed,
            vec![
                (pos(0, 0), OutcomeClass::Win),
                (pos(0, 1), OutcomeClass::Draw),
                (pos(2, 2), OutcomeClass::Loss),
            ]
        );
        assert_eq!(entry.move_count(), 3);
        assert_eq!(entry.class_of(pos(2, 2)), Some(OutcomeClass::Loss));
        assert_eq!(entry.class_of(pos(1, 1)), None);
    }

    #[test]
    fn lookup_of_missing_state_is_untrained() {
        let table = PolicyTable::new();
        let err = table.lookup(&BoardState::new()).unwrap_err();
        assert!(matches!(err, Error::UntrainedState { .. }));
    }

    #[test]
    fn summary_counts_classifications() {
        let mut table = PolicyTable::new();
        let mut entry = PolicyEntry::default();
        entry.record(pos(1, 1), OutcomeClass::Draw);
        entry.set_classification(OutcomeClass::Draw);
        table.entry(BoardState::new().key()).or_insert(entry);

        let summary = table.summary();
        assert_eq!(summary.entries, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.wins + summary.losses, 0);
    }
}
