//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Results go to stdout,
//! status and progress to stderr.

use indicatif::{ProgressBar, ProgressStyle};
use kopi_ranking::CafeEntry;
use owo_colors::OwoColorize;
use std::time::Duration;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print a hint below an error
    pub fn hint(message: &str) {
        eprintln!("  {} {}", "→".dimmed(), message.dimmed());
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Create a spinner for indeterminate progress
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Format a duration for display
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{secs:.1}s")
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// Print ranked cafes as a table
pub fn cafe_table(cafes: &[CafeEntry]) {
    println!(
        "{:>2}  {:<28} {:>6} {:>11} {:>6}  {}",
        "#".dimmed(),
        "Cafe".dimmed(),
        "Rating".dimmed(),
        "Distance".dimmed(),
        "Score".dimmed(),
        "Facilities".dimmed()
    );

    for (rank, cafe) in cafes.iter().enumerate() {
        let score = cafe.score.map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));
        let distance = cafe.distance.to_string();
        let distance = if cafe.distance.is_available() {
            distance.cyan().to_string()
        } else {
            distance.dimmed().to_string()
        };

        println!(
            "{:>2}  {:<28} {:>6} {:>11} {:>6}  {}",
            rank + 1,
            truncate(&cafe.name, 28).bold(),
            format!("{:.1}", cafe.rating).yellow(),
            distance,
            score,
            cafe.facilities.join(", ").dimmed()
        );
        if !cafe.matched_menu.is_empty() {
            println!("    {} {}", "matches:".dimmed(), cafe.matched_menu.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Tuku", 28), "Tuku");
        assert_eq!(truncate("Kopi Kenangan Senayan City", 10), "Kopi Kena…");
    }
}
