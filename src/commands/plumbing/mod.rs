//! Plumbing commands
//!
//! - `cat-file`: print a stored object
//! - `write_commit`: snapshot the staged state as a commit on the current branch

pub mod cat_file;
pub mod write_commit;
