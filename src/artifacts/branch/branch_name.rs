use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::sync::LazyLock;

pub const DEFAULT_BRANCH: &str = "master";

static INVALID_BRANCH_NAME: LazyLock<Result<regex::Regex, regex::Error>> =
    LazyLock::new(|| regex::Regex::new(INVALID_BRANCH_NAME_REGEX));

/// A validated branch name
///
/// Names may be hierarchical (`origin/master`); each component maps onto a
/// directory under `.twig/refs/heads`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> anyhow::Result<Self> {
        let name = name.into();
        let re = INVALID_BRANCH_NAME
            .as_ref()
            .map_err(Clone::clone)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if name.is_empty() || name == "HEAD" || re.is_match(&name) {
            anyhow::bail!(RepositoryError::InvalidBranchName(name));
        }

        Ok(Self(name))
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    /// `<remote>/<branch>`, the local copy of a fetched remote branch
    pub fn remote_tracking(remote: &str, branch: &BranchName) -> anyhow::Result<Self> {
        Self::try_parse(format!("{remote}/{branch}"))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
