//! Command implementations
//!
//! - `plumbing`: low-level access to stored objects and commit writing
//! - `porcelain`: the user-facing version control workflow
//!
//! Every command is an `impl Repository` block. Commands validate first and
//! then mutate in-memory state only; the caller decides whether to `flush`.

pub mod plumbing;
pub mod porcelain;
