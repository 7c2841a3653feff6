//! Languages command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::language::SUPPORTED_LANGUAGES;

/// List the supported language codes, marking the default.
pub fn run_languages(settings: &Settings) {
    Output::header("Supported languages");
    for (code, name) in SUPPORTED_LANGUAGES {
        if *code == settings.general.default_language {
            Output::list_item(&format!("{:<4} {} (default)", code, name));
        } else {
            Output::list_item(&format!("{:<4} {}", code, name));
        }
    }
}
