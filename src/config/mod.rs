//! Configuration module for Recap.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, QuestionPrompts, SummaryPrompts, TranslationPrompts};
pub use settings::{
    GeneralSettings, GenerationSettings, PromptSettings, Settings, TranscriptSettings,
    TranslationSettings,
};
