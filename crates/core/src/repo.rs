//! Repository reference parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An (owner, name) repository pair.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Parse a repository reference.
    ///
    /// Three shapes are accepted:
    /// - `owner/name`
    /// - `https://host/owner/name[.git]`
    /// - `git@host:owner/name[.git]`
    ///
    /// The hosted shapes are tried first; anything else must split into
    /// exactly two non-empty `/`-delimited segments.
    pub fn parse(input: &str) -> crate::Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(crate::Error::InvalidReference(
                "reference is empty".to_string(),
            ));
        }

        if let Some(parsed) = Self::parse_hosted(input) {
            return Ok(parsed);
        }

        let mut segments = input.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(name), None) if input.matches('/').count() == 1 => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(crate::Error::InvalidReference(format!(
                "expected owner/name, an HTTPS URL, or an SSH reference, got {input:?}"
            ))),
        }
    }

    /// Try the hosted shapes: a scheme or `git@` prefix, or a dotted host,
    /// followed by `/` or `:`, then `owner/name` with an optional `.git`.
    fn parse_hosted(input: &str) -> Option<Self> {
        let stripped = input
            .strip_prefix("https://")
            .or_else(|| input.strip_prefix("http://"))
            .or_else(|| input.strip_prefix("git@"));
        let explicit = stripped.is_some();
        let rest = stripped.unwrap_or(input);

        let (host, path) = rest.split_once(['/', ':'])?;
        if host.is_empty() || (!explicit && !host.contains('.')) {
            return None;
        }

        let (owner, name) = path.trim_end_matches('/').split_once('/')?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// The repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RepoRef({self})")
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> RepoRef {
        RepoRef::parse(input).unwrap()
    }

    #[test]
    fn test_parse_plain_pair() {
        let repo = parsed("owner/repo");
        assert_eq!(repo.owner(), "owner");
        assert_eq!(repo.name(), "repo");
        assert_eq!(repo.to_string(), "owner/repo");
    }

    #[test]
    fn test_parse_https_url() {
        assert_eq!(parsed("https://github.com/owner/repo"), parsed("owner/repo"));
        assert_eq!(
            parsed("https://github.com/owner/repo.git"),
            parsed("owner/repo")
        );
        assert_eq!(
            parsed("https://github.com/owner/repo/"),
            parsed("owner/repo")
        );
    }

    #[test]
    fn test_parse_ssh_reference() {
        assert_eq!(
            parsed("git@github.com:owner/repo.git"),
            parsed("owner/repo")
        );
        assert_eq!(parsed("git@github.com:owner/repo"), parsed("owner/repo"));
    }

    #[test]
    fn test_parse_scheme_less_host() {
        assert_eq!(parsed("github.com/owner/repo"), parsed("owner/repo"));
    }

    #[test]
    fn test_parse_rejects_indeterminate_shapes() {
        assert!(RepoRef::parse("").is_err());
        assert!(RepoRef::parse("   ").is_err());
        assert!(RepoRef::parse("invalid").is_err());
        assert!(RepoRef::parse("a/b/c").is_err());
        assert!(RepoRef::parse("/repo").is_err());
        assert!(RepoRef::parse("owner/").is_err());
    }

    #[test]
    fn test_parse_error_kind() {
        let err = RepoRef::parse("invalid").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidReference(_)));
    }
}
