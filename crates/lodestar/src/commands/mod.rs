//! CLI command implementations

pub mod advise;
pub mod analyze;
pub mod recommend;
pub mod watch;

use lodestar_recommend::{Advice, Decision, SkipReason};

use crate::output;

/// Print the outcome of a decision round
pub fn report_decision(decision: &Decision, devfile: &str) {
    match decision {
        Decision::Skipped(SkipReason::NoRecommendations) => {
            output::info("No featured extensions match this workspace")
        }
        Decision::Skipped(SkipReason::DecisionInFlight) => {
            output::info("A recommendation round is already running")
        }
        Decision::Skipped(SkipReason::NotStarted) => output::warning("Session not started"),
        Decision::Skipped(SkipReason::Stopped) => output::info("Session stopped before deciding"),
        Decision::Suggested { extensions } => {
            output::info("Recommended extensions (not installed):");
            for id in extensions {
                output::item(id);
            }
        }
        Decision::Installed {
            extensions,
            persisted: true,
            ..
        } => {
            output::success(&format!("Recommended extensions added to {}:", devfile));
            for id in extensions {
                output::item(id);
            }
        }
        Decision::Installed {
            extensions,
            persisted: false,
            ..
        } => output::warning(&format!(
            "Recommended extensions could not be added: {}",
            extensions.join(", ")
        )),
    }
}

/// Print the outcome of advising on one file
pub fn report_advice(advice: &Advice, file: &str) {
    match advice {
        Advice::NotStarted => output::warning("Session not started"),
        Advice::Stopped => output::info("Session stopped before advising"),
        Advice::OutsideWorkspace => {
            output::info(&format!("{} is outside the workspace roots", file))
        }
        Advice::UnknownLanguage => output::warning(&format!(
            "Unable to determine the language of {}; pass --language",
            file
        )),
        Advice::AlreadyCovered { extensions } => output::info(&format!(
            "Already supported by {}",
            extensions.join(", ")
        )),
        Advice::NoCandidates { language_id } => {
            output::info(&format!("No catalog extensions for '{}'", language_id))
        }
        // The notifier has already shown the recommendation
        Advice::Notified { .. } => {}
    }
}
