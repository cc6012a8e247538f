//! Checkout planning
//!
//! Moving the working tree from one commit's snapshot to another's is planned
//! in full before anything is touched: untracked files that would be
//! overwritten are collected first, and only a conflict-free plan is handed to
//! the workspace for execution.

pub mod conflict;
pub mod migration;
