#[path = "../common/mod.rs"]
mod common;

mod merge_branches;
mod refused_merges;
