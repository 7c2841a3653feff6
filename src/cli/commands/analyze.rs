//! Analyze command: summary followed by an interactive Q&A loop.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::generation::Generated;
use crate::language;
use crate::orchestrator::Orchestrator;
use crate::session::Session;
use crate::video_ref::VideoReference;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Run the analyze command.
pub async fn run_analyze(
    url: &str,
    language: Option<String>,
    ui_language: Option<String>,
    no_chat: bool,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Analyze) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;
    let mut session = orchestrator.new_session()?;

    if let Some(lang) = &language {
        warn_if_unsupported(lang);
        session.set_content_language(lang);
    }
    if let Some(lang) = ui_language.as_ref().or(language.as_ref()) {
        session.set_ui_language(lang);
    }

    let analyzed = analyze(&orchestrator, &mut session, url).await;

    if no_chat {
        return analyzed;
    }

    run_chat_loop(&orchestrator, &mut session).await
}

/// Analyze a link and print the summary.
async fn analyze(orchestrator: &Orchestrator, session: &mut Session, url: &str) -> Result<()> {
    let busy = orchestrator
        .translate_label(session, "Fetching transcript and generating analysis...")
        .await;
    let spinner = Output::spinner(&busy);
    let result = orchestrator.analyze(session, url).await;
    spinner.finish_and_clear();

    let analysis = match result {
        Ok(analysis) => analysis,
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };

    let reference = VideoReference::parse(url);
    if let Some(watch_url) = reference.watch_url() {
        Output::kv("Video", &watch_url);
    }
    if let Some(thumbnail) = reference.thumbnail_url() {
        Output::kv("Thumbnail", &thumbnail);
    }
    Output::kv(
        "Transcript",
        &format!(
            "{} ({}, {} characters)",
            language::display_name(&analysis.transcript.language),
            analysis.transcript.provenance,
            analysis.transcript.text.chars().count()
        ),
    );

    match &analysis.summary {
        Generated::Completed(text) => {
            let header = orchestrator.translate_label(session, "Video Analysis").await;
            Output::header(&header);
            println!("\n{}\n", text);
        }
        Generated::Fallback { message, reason } => {
            debug!("Summary failed: {}", reason);
            Output::warning(message);
            Output::info("Use 'analyze <url>' to try again.");
        }
    }

    Ok(())
}

/// Read questions from stdin until the user exits.
async fn run_chat_loop(orchestrator: &Orchestrator, session: &mut Session) -> Result<()> {
    let title = orchestrator.translate_label(session, "Interactive Video Insights").await;
    println!("\n{}", style(title).bold().cyan());
    println!(
        "{}\n",
        style(
            "Ask a question, or: 'analyze <url>', 'lang <code>', 'history', 'clear', 'clear-cache', 'exit'."
        )
        .dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            session.clear_chat();
            Output::info("Conversation history cleared.");
            continue;
        }

        if input.eq_ignore_ascii_case("clear-cache") {
            let dropped = session.cached_translations();
            session.clear_translations();
            Output::info(&format!("Cleared {} cached translations.", dropped));
            continue;
        }

        if input.eq_ignore_ascii_case("history") {
            print_history(session);
            continue;
        }

        if let Some(code) = input.strip_prefix("lang ") {
            let code = code.trim();
            warn_if_unsupported(code);
            session.set_content_language(code);
            session.set_ui_language(code);
            Output::info(&format!(
                "Answers will be in {}. Use 'analyze <url>' to re-summarize.",
                language::display_name(code)
            ));
            continue;
        }

        if let Some(url) = input.strip_prefix("analyze ") {
            // Errors are already reported; the loop keeps going.
            let _ = analyze(orchestrator, session, url.trim()).await;
            continue;
        }

        let busy = orchestrator.translate_label(session, "Generating response...").await;
        let spinner = Output::spinner(&busy);
        let result = orchestrator.ask(session, input).await;
        spinner.finish_and_clear();

        match result {
            Ok(turn) => {
                println!("\n{} {}\n", style("Recap:").cyan().bold(), turn.answer);
            }
            Err(e) => {
                Output::error(&e.to_string());
            }
        }
    }

    let stats = session.translation_stats();
    debug!(
        "Session {} ended: {} turns, {} translation hits, {} misses, {} failures",
        session.id(),
        session.turns().len(),
        stats.hits,
        stats.misses,
        stats.failures
    );

    Ok(())
}

fn print_history(session: &Session) {
    if session.turns().is_empty() {
        Output::info("No questions asked yet.");
        return;
    }
    for turn in session.turns() {
        Output::chat_turn(&turn.question, &turn.answer);
    }
    println!();
}

fn warn_if_unsupported(code: &str) {
    if !language::is_supported(code) {
        Output::warning(&format!(
            "'{}' is not in the supported list; results may vary. Run 'recap languages'.",
            code
        ));
    }
}
