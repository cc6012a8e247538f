//! Porcelain commands
//!
//! ## Commands
//!
//! - `init`: create a repository with its root commit
//! - `add` / `rm`: stage additions and removals
//! - `commit`: record the staged snapshot
//! - `log` / `global-log` / `find`: inspect history
//! - `status`: show branches, staged changes and the working tree
//! - `checkout` / `reset`: restore files, switch branches, move the head
//! - `branch` / `rm-branch`: manage branches
//! - `merge`: combine another branch into the current one
//! - `add-remote` / `rm-remote` / `push` / `fetch` / `pull`: synchronise with
//!   other repositories

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod fetch;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod pull;
pub mod push;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;
