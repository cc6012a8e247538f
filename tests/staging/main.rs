#[path = "../common/mod.rs"]
mod common;

mod add_files;
