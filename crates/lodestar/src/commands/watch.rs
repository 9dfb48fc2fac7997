//! Watch command
//!
//! Runs a full session: the clone signal fires once at startup, then every
//! stdin line is an opened file, either `<path>` or `<languageID> <path>`.
//! A tab always separates the language from the path; with a space the line
//! is taken as a plain path when it names an existing file or when its first
//! word looks like a path. The session stops once stdin is closed and every
//! event has been handled.

use anyhow::{Context, Result};
use camino::Utf8Path;
use lodestar_recommend::{HostEvents, OpenedDocument, RecommendationSession, SessionOutcome};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use super::{report_advice, report_decision};
use crate::cli::WatchArgs;
use crate::host::{absolutize, Host, PromptMode};
use crate::output;

/// One parsed stdin line
#[derive(Debug, PartialEq, Eq)]
struct FileEvent {
    language_id: Option<String>,
    path: PathBuf,
}

fn looks_like_language_id(word: &str) -> bool {
    !word.is_empty() && !word.contains(['/', '\\', '.'])
}

/// `is_file` reports whether a candidate path names an existing file
fn parse_event(line: &str, is_file: impl Fn(&Path) -> bool) -> Option<FileEvent> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let path_only = || FileEvent {
        language_id: None,
        path: PathBuf::from(line),
    };
    let with_language = |language: &str, path: &str| FileEvent {
        language_id: Some(language.trim().to_string()),
        path: PathBuf::from(path.trim()),
    };

    if let Some((language, path)) = line.split_once('\t') {
        if language.trim().is_empty() || path.trim().is_empty() {
            return Some(path_only());
        }
        return Some(with_language(language, path));
    }

    if is_file(Path::new(line)) {
        return Some(path_only());
    }

    match line.split_once(char::is_whitespace) {
        Some((language, path)) if looks_like_language_id(language) && !path.trim().is_empty() => {
            Some(with_language(language, path))
        }
        _ => Some(path_only()),
    }
}

pub async fn run(args: WatchArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    // Stdin carries the events, so prompts cannot be interactive
    let prompt = if args.yes {
        PromptMode::AssumeYes
    } else {
        PromptMode::AssumeNo
    };
    let host = Host::load(config_dir, &args.roots.roots, prompt)?;
    let cwd = std::env::current_dir().context("Unable to determine the current directory")?;
    let devfile = host.devfile_display();

    let (outcome_tx, mut outcomes) = mpsc::unbounded_channel();
    let mut options = host.session_options(args.timeout_ms);
    options.outcomes = Some(outcome_tx);

    let mut session = RecommendationSession::new(host.collaborators.clone(), options);
    let (sender, events) = HostEvents::channel();
    session.start(events);
    output::info("Reading opened files from stdin (`<path>` or `<language> <path>`)");

    let mut pending = 0usize;
    if sender.sources_cloned() {
        pending += 1;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    while stdin_open || pending > 0 {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    debug!("stdin closed, {} events still pending", pending);
                    stdin_open = false;
                    continue;
                };
                let Some(event) = parse_event(&line, |candidate| absolutize(candidate, &cwd).is_file()) else {
                    continue;
                };
                let path = absolutize(&event.path, &cwd);
                let language_id = match event.language_id {
                    Some(language) => language,
                    None => session
                        .analysis()
                        .await
                        .and_then(|analysis| {
                            analysis.capabilities.language_for_path(&path).map(str::to_string)
                        })
                        .unwrap_or_default(),
                };
                if sender.document_opened(OpenedDocument::new(path, language_id)) {
                    pending += 1;
                }
            }
            outcome = outcomes.recv() => {
                let Some(outcome) = outcome else {
                    break;
                };
                pending = pending.saturating_sub(1);
                match outcome {
                    SessionOutcome::Decision(decision) => report_decision(&decision, &devfile),
                    SessionOutcome::Advice { document, advice } => {
                        report_advice(&advice, &document.path.display().to_string())
                    }
                }
            }
        }
    }

    session.stop();
    Ok(())
}
