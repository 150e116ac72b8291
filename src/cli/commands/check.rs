//! Dependency check, the default command
//!
//! Finds manifests under ROOT, compares every pinned dependency with the
//! latest version of its base URL and optionally updates it.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::cli::Output;
use crate::config::{OutputFormat, Settings};
use crate::deps::{
    CheckOptions, Checker, DependencyReport, DependencyStatus, ManifestScanner, ZigFetcher,
};

#[derive(Args, Debug, Default, Clone)]
pub struct CheckArgs {
    /// Root of the project (build.zig's location). Defaults to current dir
    #[arg(value_name = "ROOT", value_parser = directory)]
    pub root: Option<PathBuf>,

    /// Scan subdirectories for other .zon files
    #[arg(short, long)]
    pub recursive: bool,

    /// Update dependencies to their latest version
    #[arg(short, long)]
    pub update: bool,

    /// Exit with status 1 when a dependency is out of date
    #[arg(long)]
    pub fail_on_outdated: bool,

    /// Concurrent `zig fetch` lookups (0 = one per CPU)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Zig executable to use
    #[arg(long, value_name = "PATH")]
    pub zig: Option<String>,
}

/// Parse a directory argument
fn directory(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("'{raw}' is not a directory."))
    }
}

pub async fn execute(args: CheckArgs, settings: &Settings, output: &Output) -> Result<ExitCode> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let scanner = ManifestScanner::new(settings.scan.manifest.as_str())
        .recursive(settings.scan.recursive)
        .respect_gitignore(settings.scan.respect_gitignore);
    let dependencies = scanner.collect(&root)?;

    if dependencies.is_empty() {
        match settings.output.format {
            OutputFormat::Json => output.always("[]"),
            OutputFormat::Text => output.line(&format!(
                "no {} file found (or no URLs in it). did you run the command from the wrong directory?",
                settings.scan.manifest
            )),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let total: usize = dependencies.values().map(Vec::len).sum();
    output.verbose(&format!(
        "Found {total} dependencies in {} manifest(s)",
        dependencies.len()
    ));

    let fetcher = ZigFetcher::locate(
        &settings.zig.binary,
        Duration::from_secs(settings.fetch.timeout_secs),
    )?;
    output.verbose(&format!("Using {}", fetcher.binary().display()));

    let checker = Checker::new(
        fetcher,
        CheckOptions {
            update: args.update,
            jobs: settings.fetch.effective_jobs(),
        },
    );

    let format = settings.output.format;
    let hash_len = settings.output.hash_len;
    let spinner = match format {
        OutputFormat::Text => output.spinner(&format!("Checking {total} dependencies...")),
        OutputFormat::Json => indicatif::ProgressBar::hidden(),
    };

    // Lines go out as each dependency settles, before any later failure
    let mut reports = Vec::new();
    let result = checker
        .run_with(&dependencies, |report| {
            if format == OutputFormat::Text {
                spinner.suspend(|| render(&report, hash_len, output));
            }
            reports.push(report);
        })
        .await;
    spinner.finish_and_clear();

    if format == OutputFormat::Json {
        output.always(&serde_json::to_string_pretty(&reports)?);
    }
    result?;

    let outdated = reports
        .iter()
        .filter(|report| report.status == DependencyStatus::OutOfDate)
        .count();

    if args.fail_on_outdated && outdated > 0 {
        output.error(&format!("{outdated} dependencies out of date"));
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn render(report: &DependencyReport, hash_len: usize, output: &Output) {
    let line = report.summary(hash_len);
    match report.status {
        DependencyStatus::UpToDate => output.line(&line),
        DependencyStatus::OutOfDate => output.always(&style(line).yellow().to_string()),
        DependencyStatus::Updated => output.always(&style(line).green().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_accepts_existing_dirs() {
        let temp = TempDir::new().unwrap();
        let raw = temp.path().to_str().unwrap();
        assert_eq!(directory(raw).unwrap(), temp.path());
    }

    #[test]
    fn test_directory_rejects_files_and_missing_paths() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("build.zig");
        std::fs::write(&file, "").unwrap();

        let err = directory(file.to_str().unwrap()).unwrap_err();
        assert!(err.ends_with("is not a directory."));
        assert!(directory("/definitely/not/here").is_err());
    }
}
