//! Split point search
//!
//! The split point of two commits is the common ancestor closest to the
//! current head. Distances count edges along any path, following both the
//! first and the second parent of merge commits, and the shortest path wins.
//! When several common ancestors sit at the same distance, the one with the
//! smallest id is picked so that the result never depends on traversal order.
//!
//! ```text
//!     A
//!    / \
//!   B   C      split(D, E) = B or C (both at distance 1 from D)
//!   |\ /|      -> B, the smaller id
//!   | X |
//!   |/ \|
//!   D   E
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

/// Finds split points over any commit storage
///
/// The loader returns the parent links of a commit; it is the only way the
/// finder touches the commit graph, so it works the same over the on-disk
/// database, a remote one or a test fixture.
#[derive(Debug, Clone)]
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every commit reachable from `start` (itself included) with its
    /// shortest distance to `start`
    ///
    /// Breadth-first order visits each commit first along a shortest path, so
    /// a distance, once recorded, is final.
    pub fn ancestors_with_distance(
        &self,
        start: &ObjectId,
    ) -> anyhow::Result<BTreeMap<ObjectId, usize>> {
        let mut distances = BTreeMap::from([(start.clone(), 0)]);
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            let distance = distances[&commit_id];
            let commit = (self.commit_loader)(&commit_id)?;

            for parent in commit.parents {
                if !distances.contains_key(&parent) {
                    distances.insert(parent.clone(), distance + 1);
                    queue.push_back(parent);
                }
            }
        }

        Ok(distances)
    }

    /// The split point of `current` and `given`, or `None` when the two
    /// histories share no commit
    pub fn find_split_point(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let from_current = self.ancestors_with_distance(current)?;
        let from_given = self.ancestors_with_distance(given)?;

        let split_point = from_current
            .iter()
            .filter(|(commit_id, _)| from_given.contains_key(*commit_id))
            .min_by(|(left_id, left), (right_id, right)| {
                left.cmp(right).then_with(|| left_id.cmp(right_id))
            })
            .map(|(commit_id, _)| commit_id.clone());

        debug!(
            current = %current.to_short_oid(),
            given = %given.to_short_oid(),
            split_point = ?split_point.as_ref().map(ObjectId::to_short_oid),
            "split point computed"
        );

        Ok(split_point)
    }
}
