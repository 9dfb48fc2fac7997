//! Analyze command

use anyhow::Result;
use camino::Utf8Path;
use lodestar_recommend::WorkspaceAnalysis;
use std::sync::Arc;

use crate::cli::AnalyzeArgs;
use crate::host::{Host, PromptMode};
use crate::output;

pub async fn run(args: AnalyzeArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let host = Host::load(config_dir, &args.roots.roots, PromptMode::AssumeNo)?;
    let collaborators = &host.collaborators;

    let spinner = (!args.json).then(|| output::spinner("Analyzing workspace..."));
    let analysis = WorkspaceAnalysis::gather(
        Arc::clone(&collaborators.catalog),
        Arc::clone(&collaborators.installed),
        Arc::clone(&collaborators.config_store),
    )
    .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    output::header("Workspace analysis");
    let roots: Vec<String> = host.roots.iter().map(|r| r.display().to_string()).collect();
    output::kv("Roots", &roots.join(", "));
    output::kv("Devfile", &host.devfile_display());
    output::kv(
        "Devfile declares extensions",
        if analysis.devfile_has_extensions { "yes" } else { "no" },
    );
    output::kv("Extensions directory", &host.extensions_dir.display().to_string());
    output::kv("Featured entries", &analysis.featured.len().to_string());

    output::header("Installed language support");
    let by_language = analysis.capabilities.extensions_by_language();
    if by_language.is_empty() {
        output::info("No installed extension activates on a language");
    }
    for (language, extensions) in by_language {
        output::kv(language, &extensions.join(", "));
    }

    output::header("Known file extensions");
    let by_extension = analysis.capabilities.languages_by_file_extension();
    if by_extension.is_empty() {
        output::info("No installed extension declares a language");
    }
    for (file_extension, languages) in by_extension {
        output::kv(file_extension, &languages.join(", "));
    }

    Ok(())
}
