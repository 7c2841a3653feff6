//! CLI command implementations.

mod analyze;
mod config;
mod languages;
mod transcript;

pub use analyze::run_analyze;
pub use config::run_config;
pub use languages::run_languages;
pub use transcript::run_transcript;
