//! JSON export of the policy table

mod common;

use common::{board, policy};
use serde_json::Value;
use tempfile::tempdir;
use tictactoe_policy::policy::{Trainer, TrainerConfig};

#[test]
fn exported_table_lists_every_entry() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("policy.json");

    policy().export_json(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let json: Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["summary"]["entries"], 4520);
    assert_eq!(json["summary"]["draws"], 1052);

    let entries = json["entries"].as_object().unwrap();
    assert_eq!(entries.len(), 4520);

    let forced = &entries["XX.OO...."];
    assert_eq!(forced["classification"], "Win");
    assert_eq!(forced["win"], serde_json::json!([{ "row": 0, "col": 2 }]));
    assert_eq!(forced["draw"].as_array().unwrap().len(), 1);
    assert_eq!(forced["loss"].as_array().unwrap().len(), 3);
}

#[test]
fn export_of_a_partial_table_writes_only_its_entries() {
    let (table, _) = Trainer::with_config(TrainerConfig::new().with_loss_recording(false))
        .train_from(board("XOXOXO..."));
    let mut buffer = Vec::new();
    table.write_json(&mut buffer).unwrap();

    let json: Value = serde_json::from_slice(&buffer).unwrap();
    let entries = json["entries"].as_object().unwrap();
    assert_eq!(entries.len(), table.len());
    assert!(entries.contains_key("XOXOXO..."));
    for entry in entries.values() {
        assert!(entry["loss"].as_array().unwrap().is_empty());
    }
}

#[test]
fn export_to_missing_directory_fails_with_context() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("missing").join("policy.json");
    let err = policy().export_json(&path).unwrap_err();
    assert!(err.to_string().contains("create"), "unexpected error: {err}");
}
