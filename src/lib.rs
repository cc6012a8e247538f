//! twig: a small distributed version control system
//!
//! Content-addressed blobs and commits, a staging index, branches, three-way
//! merges and push/fetch/pull between repositories on the same filesystem.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
