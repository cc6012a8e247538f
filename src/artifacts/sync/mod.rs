//! Object-graph replication between two repositories
//!
//! Remotes are other repositories on the same filesystem. Both sides are
//! reached only through `ObjectStore`, so the transfer code is indifferent to
//! whether either end is on disk or in memory.
//!
//! - `transfer`: copy the commits and blobs a destination lacks

pub mod transfer;
