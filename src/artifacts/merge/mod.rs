//! Merge algorithms
//!
//! - `split_point`: latest common ancestor of two commits, measured from the
//!   current head, across both parents of merge commits
//! - `resolution`: per-file three-way classification and conflict markers

pub mod resolution;
pub mod split_point;
