//! CLI module for Recap.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Recap - YouTube video summaries and Q&A
///
/// Fetches a video's transcript, summarizes it with an LLM and answers
/// follow-up questions, optionally in another language.
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a video and start an interactive Q&A session
    Analyze {
        /// YouTube URL (https://youtu.be/<id> or https://www.youtube.com/watch?v=<id>)
        url: String,

        /// Language for the transcript, summary and answers
        #[arg(short, long)]
        language: Option<String>,

        /// Language for interface labels (defaults to --language)
        #[arg(long)]
        ui_language: Option<String>,

        /// Print the summary and exit without starting the Q&A loop
        #[arg(long)]
        no_chat: bool,
    },

    /// Print a video's transcript
    Transcript {
        /// YouTube URL
        url: String,

        /// Preferred transcript language
        #[arg(short, long)]
        language: Option<String>,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Output as JSON including language and provenance
        #[arg(long)]
        json: bool,
    },

    /// List supported language codes
    Languages,

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

    /// Write the current configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["recap", "-vv", "analyze", "https://youtu.be/abc", "-l", "fr"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze {
                url,
                language,
                ui_language,
                no_chat,
            } => {
                assert_eq!(url, "https://youtu.be/abc");
                assert_eq!(language.as_deref(), Some("fr"));
                assert!(ui_language.is_none());
                assert!(!no_chat);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::parse_from(["recap", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }
}
