//! Hook configuration commands
//!
//! `hooks check` reports structural problems in the pre-commit
//! configuration; `hooks list` shows the hooks in execution order.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::cli::{HooksCommands, Output};
use crate::config::{OutputFormat, Settings};
use crate::git::RemoteRefs;
use crate::hooks::{Finding, FindingKind, PreCommitConfig};

/// Execute hooks commands
pub async fn execute(cmd: HooksCommands, settings: &Settings, output: &Output) -> Result<ExitCode> {
    match cmd {
        HooksCommands::Check { file, remote } => {
            let path = config_path(file, settings);
            check(&path, remote, settings.output.format, output).await
        }
        HooksCommands::List { file } => {
            let path = config_path(file, settings);
            list(&path, settings.output.format, output)
        }
    }
}

fn config_path(file: Option<PathBuf>, settings: &Settings) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(&settings.hooks.config_file))
}

async fn check(
    path: &Path,
    remote: bool,
    format: OutputFormat,
    output: &Output,
) -> Result<ExitCode> {
    let config = PreCommitConfig::load(path)?;
    let mut findings = config.check();

    if remote {
        let spinner = match format {
            OutputFormat::Text => output.spinner("Resolving pinned revisions..."),
            OutputFormat::Json => indicatif::ProgressBar::hidden(),
        };
        let unresolved = resolve_revisions(&config).await;
        spinner.finish_and_clear();
        findings.extend(unresolved?);
    }

    let errors = findings.iter().filter(|f| f.is_error()).count();

    match format {
        OutputFormat::Json => output.always(&serde_json::to_string_pretty(&findings)?),
        OutputFormat::Text => {
            output.header(&format!("Checking {}", path.display()));
            for finding in &findings {
                if finding.is_error() {
                    output.error(&finding.to_string());
                } else {
                    output.warning(&finding.to_string());
                }
            }

            let summary = format!(
                "{} repositories, {} hooks",
                config.repos.len(),
                config.hook_count()
            );
            if errors == 0 {
                output.success(&format!("{summary}: no problems found"));
            } else {
                output.error(&format!("{summary}: {errors} problem(s) found"));
            }
        }
    }

    Ok(if errors == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Look every remote pin up on its server; git2 is blocking so each
/// lookup runs on the blocking pool
async fn resolve_revisions(config: &PreCommitConfig) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();

    for (index, block) in config.repos.iter().enumerate() {
        let Some(rev) = block.rev.clone() else {
            continue;
        };
        if !block.is_remote() || block.repo.trim().is_empty() {
            continue;
        }

        let url = block.repo.clone();
        tracing::info!("resolving {url}@{rev}");
        let listed = tokio::task::spawn_blocking(move || RemoteRefs::list(&url)).await?;

        let reason = match listed {
            Ok(refs) => {
                let resolution = refs.resolve(&rev);
                if resolution.is_resolved() {
                    tracing::debug!("{}@{rev} resolved as {resolution:?}", block.repo);
                    None
                } else {
                    Some("no tag, branch or commit with that name".to_string())
                }
            }
            Err(err) => Some(format!("{err:#}")),
        };

        if let Some(reason) = reason {
            findings.push(Finding::new(
                format!("repos[{index}]"),
                FindingKind::UnresolvedRev {
                    repo: block.repo.clone(),
                    rev,
                    reason,
                },
            ));
        }
    }

    Ok(findings)
}

fn list(path: &Path, format: OutputFormat, output: &Output) -> Result<ExitCode> {
    let config = PreCommitConfig::load(path)?;
    let registrations = config.registrations();

    match format {
        OutputFormat::Json => output.always(&serde_json::to_string_pretty(&registrations)?),
        OutputFormat::Text => {
            output.header(&format!("Hooks in {}", path.display()));
            for registration in &registrations {
                let source = match registration.rev {
                    Some(rev) => format!("{}@{rev}", registration.repo),
                    None => registration.repo.to_string(),
                };
                let mut line = format!("{}. {} ({source})", registration.position, registration.id);
                if !registration.args.is_empty() {
                    line.push(' ');
                    line.push_str(&registration.args.join(" "));
                }
                output.always(&line);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
