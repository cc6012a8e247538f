use crate::areas::database::ObjectStore;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;
use tracing::debug;

/// Objects copied by a transfer
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransferStats {
    pub commits: usize,
    pub blobs: usize,
}

/// Copy `tip` and every ancestor the destination lacks, with the blobs they
/// track
///
/// Both parents of merge commits are followed. A commit already present in
/// the destination ends the walk along that path, since everything reachable
/// from it is present too. Objects are copied as raw bytes, so ids never
/// change in transit.
pub fn copy_missing_closure(
    source: &dyn ObjectStore,
    destination: &mut dyn ObjectStore,
    tip: &ObjectId,
) -> anyhow::Result<TransferStats> {
    let mut stats = TransferStats::default();
    let mut visited = BTreeSet::new();
    let mut pending = vec![tip.clone()];

    while let Some(commit_id) = pending.pop() {
        if !visited.insert(commit_id.clone()) || destination.contains(&commit_id)? {
            continue;
        }

        let commit = source.get_commit(&commit_id)?;
        for blob_id in commit.tracked().values() {
            if !destination.contains(blob_id)? {
                destination.write_raw(blob_id.clone(), source.read_raw(blob_id)?)?;
                stats.blobs += 1;
            }
        }

        destination.write_raw(commit_id.clone(), source.read_raw(&commit_id)?)?;
        stats.commits += 1;

        pending.extend(commit.parents().cloned());
    }

    debug!(
        tip = %tip.to_short_oid(),
        commits = stats.commits,
        blobs = stats.blobs,
        "objects transferred"
    );

    Ok(stats)
}
