//! Integration tests for the filesystem extension scanner
//!
//! Tests cover:
//! - Distinct extensions across nested directories
//! - Ignore-file handling and hidden entries
//! - De-duplication across several roots
//! - Missing roots and the soft deadline

use lodestar_workspace::{ExtensionScanner, FsExtensionScanner};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

const TIMEOUT: Duration = Duration::from_secs(10);

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

fn roots(dirs: &[&TempDir]) -> Vec<PathBuf> {
    dirs.iter().map(|d| d.path().to_path_buf()).collect()
}

#[tokio::test]
async fn test_finds_distinct_extensions() {
    let project = TempDir::new().unwrap();
    touch(project.path(), "src/main/java/App.java");
    touch(project.path(), "src/main/java/Util.java");
    touch(project.path(), "notebooks/analysis.ipynb");
    touch(project.path(), "Makefile");

    let found = FsExtensionScanner::new()
        .find(&roots(&[&project]), TIMEOUT)
        .await;

    let found: Vec<_> = found.into_iter().collect();
    assert_eq!(found, vec![".ipynb", ".java"]);
}

#[tokio::test]
async fn test_respects_gitignore() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(".gitignore"), "target/\n*.log\n").unwrap();
    touch(project.path(), "src/lib.rs");
    touch(project.path(), "target/debug/build.class");
    touch(project.path(), "server.log");

    let found = FsExtensionScanner::new()
        .find(&roots(&[&project]), TIMEOUT)
        .await;

    assert!(found.contains(".rs"));
    assert!(!found.contains(".class"));
    assert!(!found.contains(".log"));
}

#[tokio::test]
async fn test_skips_hidden_entries() {
    let project = TempDir::new().unwrap();
    touch(project.path(), ".git/objects/pack.idx");
    touch(project.path(), ".vscode/settings.json");
    touch(project.path(), "app.py");

    let found = FsExtensionScanner::new()
        .find(&roots(&[&project]), TIMEOUT)
        .await;

    assert!(found.contains(".py"));
    assert!(!found.contains(".idx"));
    assert!(!found.contains(".json"));
}

#[tokio::test]
async fn test_deduplicates_across_roots() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    touch(first.path(), "a.go");
    touch(first.path(), "b.ts");
    touch(second.path(), "c.go");
    touch(second.path(), "d.rs");

    let found = FsExtensionScanner::new()
        .find(&roots(&[&first, &second]), TIMEOUT)
        .await;

    let found: Vec<_> = found.into_iter().collect();
    assert_eq!(found, vec![".go", ".rs", ".ts"]);
}

#[tokio::test]
async fn test_missing_root_contributes_nothing() {
    let project = TempDir::new().unwrap();
    touch(project.path(), "main.c");
    let missing = project.path().join("does-not-exist");

    let found = FsExtensionScanner::new()
        .find(&[missing, project.path().to_path_buf()], TIMEOUT)
        .await;

    let found: Vec<_> = found.into_iter().collect();
    assert_eq!(found, vec![".c"]);
}

#[tokio::test]
async fn test_no_roots_is_empty() {
    let found = FsExtensionScanner::new().find(&[], TIMEOUT).await;
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_deadline_returns_partial_results() {
    let project = TempDir::new().unwrap();
    for i in 0..200 {
        touch(project.path(), &format!("dir{}/file{}.ext{}", i % 10, i, i));
    }

    let started = Instant::now();
    let found = FsExtensionScanner::new()
        .find(&roots(&[&project]), Duration::ZERO)
        .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    // Whatever was collected is a subset of what exists
    assert!(found.len() <= 200);
    assert!(found.iter().all(|ext| ext.starts_with(".ext")));
}
