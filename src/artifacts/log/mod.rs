//! Commit history traversal
//!
//! - `log_chain`: walk from a commit to the root along first parents only
//!
//! Merge commits contribute their second parent to ancestry (see
//! `merge::split_point`) but not to the log chain.

pub mod log_chain;
