//! Terminal host wiring
//!
//! Binds the recommendation engine's collaborators to the local machine:
//! configuration from `~/.lodestar`, installed manifests from the extensions
//! directory, the devfile next to the first workspace root, HTTP for the
//! catalog and the terminal for prompts and notifications.

use anyhow::{Context, Result};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use dialoguer::Confirm;
use lodestar_catalog::HttpCatalog;
use lodestar_core::{ConfigLoader, Notifier, RecommenderConfig};
use lodestar_recommend::{Collaborators, Confirmation, Prompter, SessionOptions};
use lodestar_workspace::{DevfileStore, FsExtensionScanner, ManifestDirectory, NotifyingRestarter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::output;

/// Notifier printing to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        output::info(message);
    }
}

/// How yes/no questions are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Interactive,
    AssumeYes,
    AssumeNo,
}

#[derive(Debug, Clone, Copy)]
pub struct ConsolePrompter {
    mode: PromptMode,
}

impl ConsolePrompter {
    pub fn new(mode: PromptMode) -> Self {
        Self { mode }
    }
}

#[async_trait]
impl Prompter for ConsolePrompter {
    async fn ask(&self, message: &str) -> Confirmation {
        match self.mode {
            PromptMode::AssumeYes => {
                output::info(&format!("{} yes", message));
                return Confirmation::Yes;
            }
            PromptMode::AssumeNo => {
                output::info(&format!("{} no", message));
                return Confirmation::No;
            }
            PromptMode::Interactive => {}
        }

        let prompt = message.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact_opt()
        })
        .await;

        match answer {
            Ok(Ok(Some(true))) => Confirmation::Yes,
            Ok(Ok(Some(false))) => Confirmation::No,
            Ok(Ok(None)) => Confirmation::Dismissed,
            Ok(Err(e)) => {
                warn!("Prompt failed: {}", e);
                Confirmation::Dismissed
            }
            Err(e) => {
                warn!("Prompt task failed: {}", e);
                Confirmation::Dismissed
            }
        }
    }
}

/// Load configuration from `config_dir`, or `~/.lodestar` by default
pub fn load_config(config_dir: Option<&Utf8Path>) -> Result<RecommenderConfig> {
    let loader = match config_dir {
        Some(dir) => ConfigLoader::with_dir(dir.to_path_buf()),
        None => ConfigLoader::new()?,
    };
    debug!("Loading configuration from {}", loader.config_dir());
    loader.load().context("Failed to load configuration")
}

/// Absolute workspace roots; the current directory when none are given
pub fn resolve_roots(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir().context("Unable to determine the current directory")?;
    if roots.is_empty() {
        return Ok(vec![cwd]);
    }
    Ok(roots.iter().map(|root| absolutize(root, &cwd)).collect())
}

/// Canonical form of `path`, or `path` joined onto `base` when it does not exist
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| base.join(path))
}

/// Relative devfile paths are resolved against the first workspace root
pub fn devfile_path(config: &RecommenderConfig, roots: &[PathBuf]) -> PathBuf {
    let devfile = config.workspace.devfile.as_std_path();
    match roots.first() {
        Some(root) if devfile.is_relative() => root.join(devfile),
        _ => devfile.to_path_buf(),
    }
}

/// Everything a command needs to run the engine
pub struct Host {
    pub config: RecommenderConfig,
    pub roots: Vec<PathBuf>,
    pub devfile: PathBuf,
    pub extensions_dir: PathBuf,
    pub collaborators: Collaborators,
}

impl Host {
    pub fn new(config: RecommenderConfig, roots: &[PathBuf], prompt: PromptMode) -> Result<Self> {
        let roots = resolve_roots(roots)?;
        let devfile = devfile_path(&config, &roots);
        let extensions_dir = config.workspace.resolved_extensions_dir()?;
        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

        let catalog = HttpCatalog::new(&config.catalog, Arc::clone(&notifier))
            .context("Invalid catalog configuration")?;

        debug!(
            "Host: roots {:?}, devfile {}, extensions {}",
            roots,
            devfile.display(),
            extensions_dir.display()
        );

        let collaborators = Collaborators {
            installed: Arc::new(ManifestDirectory::new(&extensions_dir)),
            catalog: Arc::new(catalog),
            scanner: Arc::new(FsExtensionScanner::new()),
            config_store: Arc::new(DevfileStore::new(&devfile)),
            restarter: Arc::new(NotifyingRestarter::new(Arc::clone(&notifier))),
            prompter: Arc::new(ConsolePrompter::new(prompt)),
            notifier,
            roots: Arc::new(roots.clone()),
        };

        Ok(Self {
            config,
            roots,
            devfile,
            extensions_dir,
            collaborators,
        })
    }

    pub fn load(
        config_dir: Option<&Utf8Path>,
        roots: &[PathBuf],
        prompt: PromptMode,
    ) -> Result<Self> {
        Self::new(load_config(config_dir)?, roots, prompt)
    }

    /// Session options with an optional scan deadline override
    pub fn session_options(&self, timeout_ms: Option<u64>) -> SessionOptions {
        SessionOptions {
            scan_timeout: timeout_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| self.config.scan.timeout()),
            outcomes: None,
        }
    }

    pub fn devfile_display(&self) -> String {
        Utf8PathBuf::from_path_buf(self.devfile.clone())
            .map(|p| p.to_string())
            .unwrap_or_else(|p| p.display().to_string())
    }
}
