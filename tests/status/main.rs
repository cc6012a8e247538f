#[path = "../common/mod.rs"]
mod common;

mod report_sections;
