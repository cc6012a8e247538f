//! Repository components
//!
//! - `database`: the object store seam and its on-disk backend
//! - `memory`: in-memory object store
//! - `index`: staging area
//! - `refs`: branches, HEAD and remotes
//! - `repository`: the context value every command runs against
//! - `workspace`: working tree file operations

pub mod database;
pub mod index;
pub mod memory;
pub mod refs;
pub mod repository;
pub mod workspace;
