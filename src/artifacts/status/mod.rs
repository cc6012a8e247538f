//! Working tree status
//!
//! A read-only projection of the reference table, the staging index, the
//! head commit and the working tree.
//!
//! ## Components
//!
//! - `file_change`: how a tracked or staged file differs from the working tree
//! - `status_info`: the sectioned status report and its rendering

pub mod file_change;
pub mod status_info;
