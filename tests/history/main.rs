#[path = "../common/mod.rs"]
mod common;

mod cat_file;
mod find_commits;
mod log_history;
