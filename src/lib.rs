//! Recap - YouTube video summaries and Q&A
//!
//! Fetches a YouTube video's transcript, summarizes it with an LLM, and
//! answers follow-up questions against that summary, optionally translating
//! content into another language.
//!
//! # Architecture
//!
//! - `video_ref` - Link parsing into video IDs
//! - `transcript` - Caption track listing and the language fallback chain
//! - `translation` - Translator abstraction and the session translation cache
//! - `generation` - Prompt formatting and LLM calls for summaries and answers
//! - `session` - Per-session state (summary, chat history, languages, cache)
//! - `orchestrator` - The analyze and ask actions
//! - `retry` - Bounded retry with exponential backoff
//! - `config` - Settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use recap::config::Settings;
//! use recap::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let orchestrator = Orchestrator::new(Settings::load()?)?;
//!     let mut session = orchestrator.new_session()?;
//!
//!     let analysis = orchestrator
//!         .analyze(&mut session, "https://youtu.be/dQw4w9WgXcQ")
//!         .await?;
//!     println!("{}", analysis.summary.text());
//!
//!     let turn = orchestrator.ask(&mut session, "What is the main point?").await?;
//!     println!("{}", turn.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod language;
pub mod openai;
pub mod orchestrator;
pub mod retry;
pub mod session;
pub mod transcript;
pub mod translation;
pub mod video_ref;

pub use error::{ErrorKind, RecapError, Result};
