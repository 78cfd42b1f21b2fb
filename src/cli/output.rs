//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, error::Error};

/// Create a progress bar for evaluation sessions
pub fn create_progress(total_games: u64, enabled: bool) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
        .map_err(template_error)?
        .progress_chars("=>-");
    let pb = ProgressBar::new(total_games);
    pb.set_style(style);
    Ok(pb)
}

/// Create a spinner for long-running steps such as training
pub fn create_spinner(message: &str, enabled: bool) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map_err(template_error)?;
    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn template_error(err: impl std::fmt::Display) -> Error {
    Error::ProgressBarTemplate {
        message: err.to_string(),
    }
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format `part` as a percentage of `whole`
pub fn format_rate(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(4520), "4,520");
        assert_eq!(format_number(340858), "340,858");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn format_rate_handles_empty_runs() {
        assert_eq!(format_rate(1, 0), "-");
        assert_eq!(format_rate(1, 4), "25.0%");
    }

    #[test]
    fn hidden_bars_when_progress_disabled() {
        assert!(create_progress(10, false).unwrap().is_hidden());
        assert!(create_spinner("training", false).unwrap().is_hidden());
    }
}
