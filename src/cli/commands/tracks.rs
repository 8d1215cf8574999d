//! Tracks command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// List the caption tracks of a video, marking the one a question would use.
pub async fn run_tracks(input: &str, settings: &Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Fetching caption tracks...");
    let result = orchestrator.list_tracks(input).await;
    spinner.finish_and_clear();

    let (tracks, selected) = match result {
        Ok(found) => found,
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };

    Output::header(&format!("Caption tracks for {}", input.trim()));
    if tracks.is_empty() {
        Output::warning("No caption tracks available.");
        return Ok(());
    }

    for (i, track) in tracks.iter().enumerate() {
        Output::track(track, selected == Some(i));
    }

    Ok(())
}
