//! Language code helpers.
//!
//! Codes are BCP 47-ish tags as used by YouTube caption tracks (`en`, `en-GB`,
//! `pt-BR`, `zh-Hans`). Two codes are considered the same language when their
//! primary subtags match case-insensitively.

/// The pivot language used for translation and the identity short-circuit.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages offered by the CLI, as (code, English name).
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("nl", "Dutch"),
    ("ru", "Russian"),
    ("uk", "Ukrainian"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("bn", "Bengali"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("id", "Indonesian"),
    ("vi", "Vietnamese"),
];

/// Normalize a language code: trimmed, lowercase, `_` replaced with `-`.
pub fn normalize(code: &str) -> String {
    code.trim().replace('_', "-").to_lowercase()
}

/// Primary subtag of a language code (`"en-US"` -> `"en"`).
pub fn primary_subtag(code: &str) -> String {
    let normalized = normalize(code);
    normalized
        .split('-')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Whether two codes name the same language.
pub fn same_language(a: &str, b: &str) -> bool {
    let a = primary_subtag(a);
    !a.is_empty() && a == primary_subtag(b)
}

/// English display name for a code, falling back to the code itself.
pub fn display_name(code: &str) -> String {
    let primary = primary_subtag(code);
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == primary)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.trim().to_string())
}

/// Whether a code is in the supported list.
pub fn is_supported(code: &str) -> bool {
    let primary = primary_subtag(code);
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == primary)
}
