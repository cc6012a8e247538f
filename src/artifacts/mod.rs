//! Data structures and algorithms
//!
//! - `branch`: branch name validation
//! - `checkout`: checkout planning and untracked-file protection
//! - `core`: shared utilities (pager writer, environment, tracing)
//! - `index`: staging index file format
//! - `log`: first-parent history traversal
//! - `merge`: split point search and three-way file resolution
//! - `objects`: object types (blob, commit) and their encoding
//! - `status`: working tree status projection
//! - `sync`: object transfer between repositories

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
pub mod sync;
