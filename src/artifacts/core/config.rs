use anyhow::Context;
use chrono::{DateTime, FixedOffset};

/// `tracing` filter directive, e.g. `twig=debug`
pub const LOG_ENV: &str = "TWIG_LOG";

/// Fixed timestamp for new commits
pub const COMMIT_DATE_ENV: &str = "TWIG_COMMIT_DATE";

/// Any value turns the pager off
pub const NO_PAGER_ENV: &str = "NO_PAGER";

const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Timestamp for a new commit: `TWIG_COMMIT_DATE` when set, the local clock otherwise
pub fn commit_timestamp() -> anyhow::Result<DateTime<FixedOffset>> {
    match std::env::var(COMMIT_DATE_ENV) {
        Ok(date) => parse_commit_date(&date),
        Err(_) => Ok(chrono::Local::now().fixed_offset()),
    }
}

/// Accepts `%Y-%m-%d %H:%M:%S %z` or RFC 2822
pub fn parse_commit_date(date: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(date, COMMIT_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc2822(date))
        .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date: {date}"))
}

pub fn pager_disabled() -> bool {
    std::env::var_os(NO_PAGER_ENV).is_some()
}
