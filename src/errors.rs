//! User-facing failure kinds
//!
//! Internals speak `anyhow`; anything a user can provoke with ordinary input is
//! raised as one of these variants so the command line can tell a refused
//! operation apart from a broken repository (I/O failure, corrupt object).

use std::fmt;
use thiserror::Error;

/// What kind of thing could not be found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Object,
    Commit,
    Branch,
    Remote,
    RemoteBranch,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Missing::Object => "object",
            Missing::Commit => "commit",
            Missing::Branch => "branch",
            Missing::Remote => "remote",
            Missing::RemoteBranch => "remote branch",
        };
        write!(f, "{kind}")
    }
}

/// What kind of name was already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existing {
    Branch,
    Remote,
}

impl fmt::Display for Existing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Existing::Branch => write!(f, "branch"),
            Existing::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("No {0} named '{1}' exists.")]
    NotFound(Missing, String),

    #[error("Id prefix '{0}' matches more than one commit.")]
    AmbiguousId(String),

    #[error("A {0} with that name already exists.")]
    AlreadyExists(Existing, String),

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove(String),

    #[error(
        "There is an untracked file in the way; delete it, or add and commit it first: {}",
        .0.join(", ")
    )]
    UntrackedOverwrite(Vec<String>),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("No need to checkout the current branch.")]
    SameBranchCheckout,

    #[error("Please pull down remote changes before pushing.")]
    DivergedHistory,

    #[error("File does not exist: {0}")]
    FileNotFound(String),

    #[error("File does not exist in that commit: {0}")]
    FileNotInCommit(String),

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("A twig repository already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized twig directory.")]
    NotInitialized,

    #[error("Found no commit with that message.")]
    NoMatchingCommit,

    #[error("Remote directory not found: {0}")]
    RemoteNotFound(String),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Incorrect operands.")]
    IncorrectOperands,
}
