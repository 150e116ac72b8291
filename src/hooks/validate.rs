use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::PreCommitConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Problems a hook configuration can have before the runner ever sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// The file lists no repositories at all
    NoRepos,
    /// Repository block with an empty URL
    EmptyRepo,
    /// Remote repository without a revision pin
    MissingRev { repo: String },
    /// Repository block selecting no hooks
    NoHooks { repo: String },
    /// Hook block with an empty id
    EmptyHookId { repo: String },
    /// Same hook configured again with the same arguments
    DuplicateHook { repo: String, id: String, first: String },
    /// Same hook configured again with different arguments
    ConflictingArgs { repo: String, id: String, first: String },
    /// Pinned revision could not be found on the remote
    UnresolvedRev { repo: String, rev: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Where in the file, e.g. `repos[1].hooks[0]`
    pub location: String,
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: FindingKind,
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::NoRepos
            | FindingKind::DuplicateHook { .. }
            | FindingKind::ConflictingArgs { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl Finding {
    pub fn new(location: impl Into<String>, kind: FindingKind) -> Self {
        Self {
            location: location.into(),
            severity: kind.severity(),
            kind,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::NoRepos => write!(f, "no repositories configured"),
            FindingKind::EmptyRepo => write!(f, "repository URL is empty"),
            FindingKind::MissingRev { repo } => write!(f, "{repo} has no pinned rev"),
            FindingKind::NoHooks { repo } => write!(f, "{repo} selects no hooks"),
            FindingKind::EmptyHookId { repo } => write!(f, "hook from {repo} has an empty id"),
            FindingKind::DuplicateHook { repo, id, first } => {
                write!(f, "'{id}' from {repo} is already configured at {first}")
            }
            FindingKind::ConflictingArgs { repo, id, first } => write!(
                f,
                "'{id}' from {repo} is configured at {first} with different args"
            ),
            FindingKind::UnresolvedRev { repo, rev, reason } => {
                write!(f, "{repo}@{rev} cannot be resolved: {reason}")
            }
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

pub(super) fn check(config: &PreCommitConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    if config.repos.is_empty() {
        findings.push(Finding::new("repos", FindingKind::NoRepos));
    }

    // (repo, hook id) -> first location and its args
    let mut seen: HashMap<(&str, &str), (String, &[String])> = HashMap::new();

    for (r, block) in config.repos.iter().enumerate() {
        let location = format!("repos[{r}]");
        let repo = block.repo.clone();

        if block.repo.trim().is_empty() {
            findings.push(Finding::new(&location, FindingKind::EmptyRepo));
        }

        let unpinned = block.rev.as_deref().is_none_or(|rev| rev.trim().is_empty());
        if block.is_remote() && unpinned {
            findings.push(Finding::new(&location, FindingKind::MissingRev { repo: repo.clone() }));
        }

        if block.hooks.is_empty() {
            findings.push(Finding::new(&location, FindingKind::NoHooks { repo: repo.clone() }));
        }

        for (h, hook) in block.hooks.iter().enumerate() {
            let hook_location = format!("{location}.hooks[{h}]");

            if hook.id.trim().is_empty() {
                findings.push(Finding::new(
                    hook_location,
                    FindingKind::EmptyHookId { repo: repo.clone() },
                ));
                continue;
            }

            match seen.get(&(block.repo.as_str(), hook.id.as_str())) {
                Some((first, args)) => {
                    let kind = if *args == hook.args.as_slice() {
                        FindingKind::DuplicateHook {
                            repo: repo.clone(),
                            id: hook.id.clone(),
                            first: first.clone(),
                        }
                    } else {
                        FindingKind::ConflictingArgs {
                            repo: repo.clone(),
                            id: hook.id.clone(),
                            first: first.clone(),
                        }
                    };
                    findings.push(Finding::new(hook_location, kind));
                }
                None => {
                    seen.insert(
                        (block.repo.as_str(), hook.id.as_str()),
                        (hook_location, hook.args.as_slice()),
                    );
                }
            }
        }
    }

    findings
}
