//! Recommend command

use anyhow::Result;
use camino::Utf8Path;
use lodestar_recommend::{HostEvents, RecommendationSession};

use super::report_decision;
use crate::cli::RecommendArgs;
use crate::host::{Host, PromptMode};

pub async fn run(args: RecommendArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let prompt = if args.yes {
        PromptMode::AssumeYes
    } else {
        PromptMode::Interactive
    };
    let host = Host::load(config_dir, &args.roots.roots, prompt)?;

    let mut session =
        RecommendationSession::new(host.collaborators.clone(), host.session_options(args.timeout_ms));
    let (_sender, events) = HostEvents::without_clone_signal();
    session.start(events);

    let decision = session.after_clone().await;
    session.stop();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        report_decision(&decision, &host.devfile_display());
    }

    Ok(())
}
