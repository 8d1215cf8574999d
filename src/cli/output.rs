//! CLI output formatting utilities.

use crate::captions::CaptionTrack;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print one caption track, highlighting the selected one.
    pub fn track(track: &CaptionTrack, selected: bool) {
        let marker = if selected {
            style("*").green().bold()
        } else {
            style("-").dim()
        };
        let line = track_line(track);
        if selected {
            println!("  {} {}", marker, style(line).bold());
        } else {
            println!("  {} {}", marker, line);
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Single-line description of a caption track.
fn track_line(track: &CaptionTrack) -> String {
    format!("{} ({}, {})", track.language_name, track.language_code, track.kind())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_line() {
        let track = CaptionTrack::new("es", "Spanish (auto-generated)", true);
        assert_eq!(track_line(&track), "Spanish (auto-generated) (es, generated)");

        let track = CaptionTrack::new("en", "English", false);
        assert_eq!(track_line(&track), "English (en, manual)");
    }
}
