//! Object types
//!
//! Everything the object store holds is one of two kinds:
//!
//! - **Blob**: the raw bytes of one version of a file
//! - **Commit**: a snapshot (filename → blob id) with parents, timestamp and message
//!
//! Both serialize to `<type> <size>\0<body>` and are identified by the SHA-1
//! of those bytes.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated id shown by `log` and `commit`
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
