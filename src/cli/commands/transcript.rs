//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::output::content_preview;
use crate::cli::Output;
use crate::config::Settings;
use crate::language;
use crate::orchestrator::Orchestrator;
use crate::transcript::TranscriptResult;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    url: &str,
    language: Option<String>,
    output: Option<String>,
    json: bool,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Transcript)?;

    let language = language.unwrap_or_else(|| settings.general.default_language.clone());
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = orchestrator.fetch_transcript(url, &language).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(transcript) => transcript,
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };

    if !language::same_language(&transcript.language, &language) {
        Output::warning(&format!(
            "No {} transcript available; using {} instead.",
            language::display_name(&language),
            language::display_name(&transcript.language)
        ));
    }

    let rendered = render(&transcript, json)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            Output::success(&format!(
                "Wrote {} transcript ({}) to {}",
                transcript.language, transcript.provenance, path
            ));
            Output::kv("Preview", &content_preview(&transcript.text, 120));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn render(transcript: &TranscriptResult, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(transcript)?)
    } else {
        Ok(transcript.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Provenance;

    #[test]
    fn test_render_json() {
        let transcript = TranscriptResult {
            video_id: "abc".to_string(),
            text: "Hello world .".to_string(),
            language: "fr".to_string(),
            provenance: Provenance::HostTranslated,
        };

        assert_eq!(render(&transcript, false).unwrap(), "Hello world .");

        let json: serde_json::Value =
            serde_json::from_str(&render(&transcript, true).unwrap()).unwrap();
        assert_eq!(json["provenance"], "host-translated");
        assert_eq!(json["video_id"], "abc");
    }
}
