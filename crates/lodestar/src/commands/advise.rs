//! Advise command

use anyhow::{Context, Result};
use camino::Utf8Path;
use lodestar_recommend::{HostEvents, OpenedDocument, RecommendationSession};

use super::report_advice;
use crate::cli::AdviseArgs;
use crate::host::{absolutize, Host, PromptMode};

pub async fn run(args: AdviseArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let host = Host::load(config_dir, &args.roots.roots, PromptMode::AssumeNo)?;
    let cwd = std::env::current_dir().context("Unable to determine the current directory")?;
    let path = absolutize(&args.file, &cwd);

    let mut session =
        RecommendationSession::new(host.collaborators.clone(), host.session_options(None));
    let (_sender, events) = HostEvents::without_clone_signal();
    session.start(events);

    let language_id = match args.language {
        Some(language) => language,
        None => session
            .analysis()
            .await
            .and_then(|analysis| {
                analysis
                    .capabilities
                    .language_for_path(&path)
                    .map(str::to_string)
            })
            .unwrap_or_default(),
    };

    let advice = session
        .on_open_file(&OpenedDocument::new(&path, language_id))
        .await;
    session.stop();

    report_advice(&advice, &args.file.display().to_string());

    Ok(())
}
