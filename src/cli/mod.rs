//! CLI module for vidask.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// vidask - Ask questions about YouTube videos
///
/// Fetches a video's captions, translates them to English when needed and
/// answers questions from the transcript.
#[derive(Parser, Debug)]
#[command(name = "vidask")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "VIDASK_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about a YouTube video
    Ask {
        /// YouTube video URL
        url: String,

        /// The question to ask
        query: String,
    },

    /// List the caption tracks of a video
    Tracks {
        /// YouTube video URL or ID
        input: String,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::parse_from([
            "vidask",
            "-vv",
            "ask",
            "https://youtu.be/dQw4w9WgXcQ",
            "What is the song about?",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask { url, query } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(query, "What is the song about?");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["vidask", "serve", "--host", "0.0.0.0", "-p", "8080"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["vidask", "serve"]);
        assert!(matches!(cli.command, Commands::Serve { host: None, port: None }));
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::parse_from(["vidask", "--config", "/tmp/v.toml", "config", "init", "--force"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/v.toml"));
        assert!(matches!(
            cli.command,
            Commands::Config { action: ConfigAction::Init { force: true } }
        ));
    }
}
