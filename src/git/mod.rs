//! Remote revision lookup for hook repositories
//!
//! Uses git2 to list a remote's advertised refs without cloning it, which is
//! enough to tell whether a `rev` pin names an existing tag or branch.

use anyhow::{Context, Result};
use git2::{Direction, Remote};

/// How a pinned revision was matched on the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Tag,
    Branch,
    /// An advertised ref points at this commit
    Commit,
    /// Full commit id that no ref points at; servers do not advertise every commit
    UnadvertisedCommit,
    Missing,
}

impl Resolution {
    pub fn is_resolved(self) -> bool {
        !matches!(self, Resolution::Missing)
    }
}

/// A remote's advertised refs as (name, target commit id) pairs
#[derive(Debug, Clone, Default)]
pub struct RemoteRefs {
    refs: Vec<(String, String)>,
}

impl RemoteRefs {
    /// Connect to `url` and list its refs
    pub fn list(url: &str) -> Result<Self> {
        let mut remote = Remote::create_detached(url)
            .with_context(|| format!("Invalid repository URL: {url}"))?;
        remote
            .connect(Direction::Fetch)
            .with_context(|| format!("Failed to connect to {url}"))?;

        let refs = remote
            .list()
            .with_context(|| format!("Failed to list refs of {url}"))?
            .iter()
            .map(|head| (head.name().to_string(), head.oid().to_string()))
            .collect();

        remote.disconnect().ok();
        Ok(Self { refs })
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            refs: pairs
                .into_iter()
                .map(|(name, oid)| (name.into(), oid.into()))
                .collect(),
        }
    }

    /// Match a `rev` pin against the advertised refs
    pub fn resolve(&self, rev: &str) -> Resolution {
        let tag = format!("refs/tags/{rev}");
        let peeled_tag = format!("{tag}^{{}}");
        let branch = format!("refs/heads/{rev}");

        if self.refs.iter().any(|(name, _)| *name == tag || *name == peeled_tag) {
            return Resolution::Tag;
        }
        if self.refs.iter().any(|(name, _)| *name == branch) {
            return Resolution::Branch;
        }
        if self.refs.iter().any(|(_, oid)| oid == rev) {
            return Resolution::Commit;
        }
        if is_full_commit_id(rev) {
            return Resolution::UnadvertisedCommit;
        }

        Resolution::Missing
    }
}

fn is_full_commit_id(rev: &str) -> bool {
    rev.len() == 40 && rev.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "cef0300fd0fc4d2a87a85fa2093c6b283ea36f4b";

    fn refs() -> RemoteRefs {
        RemoteRefs::from_pairs([
            ("HEAD", SHA),
            ("refs/heads/main", SHA),
            ("refs/tags/v5.0.0", "1111111111111111111111111111111111111111"),
            ("refs/tags/v4.6.0^{}", "2222222222222222222222222222222222222222"),
        ])
    }

    #[test]
    fn test_resolves_tags_and_branches() {
        assert_eq!(refs().resolve("v5.0.0"), Resolution::Tag);
        assert_eq!(refs().resolve("v4.6.0"), Resolution::Tag);
        assert_eq!(refs().resolve("main"), Resolution::Branch);
    }

    #[test]
    fn test_resolves_commits() {
        assert_eq!(refs().resolve(SHA), Resolution::Commit);
        assert_eq!(
            refs().resolve("0123456789abcdef0123456789abcdef01234567"),
            Resolution::UnadvertisedCommit
        );
    }

    #[test]
    fn test_missing_revision() {
        let resolution = refs().resolve("v9.9.9");
        assert_eq!(resolution, Resolution::Missing);
        assert!(!resolution.is_resolved());
        // Abbreviated ids cannot be proven to exist from the ref list
        assert_eq!(refs().resolve("cef0300"), Resolution::Missing);
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        assert!(RemoteRefs::list("").is_err());
    }
}
