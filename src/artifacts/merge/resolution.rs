//! Three-way file resolution
//!
//! Each file name present in the split point, the current head or the given
//! head is classified by comparing its blob id in the three snapshots. A
//! missing file compares equal only to another missing file.

use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResolution {
    /// Both sides agree, whatever happened since the split point
    Unchanged,
    /// Only the current side changed the file
    KeepCurrent,
    /// Only the given side changed the file; check out and stage its version
    TakeGiven(ObjectId),
    /// Only the given side deleted the file; delete and stage the removal
    RemoveLocally,
    /// Both sides changed the file in different ways
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

impl FileResolution {
    /// True when merging has to touch the working tree for this file
    pub fn is_actionable(&self) -> bool {
        !matches!(self, FileResolution::Unchanged | FileResolution::KeepCurrent)
    }
}

pub fn resolve(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
) -> FileResolution {
    if current == given {
        return FileResolution::Unchanged;
    }

    if split == current {
        return match given {
            Some(blob_id) => FileResolution::TakeGiven(blob_id.clone()),
            None => FileResolution::RemoveLocally,
        };
    }

    if split == given {
        return FileResolution::KeepCurrent;
    }

    FileResolution::Conflict {
        current: current.cloned(),
        given: given.cloned(),
    }
}

/// Content written in place of a conflicted file; a deleted side
/// contributes empty content
pub fn conflict_markers(current: &[u8], given: &[u8]) -> Bytes {
    let mut content = Vec::with_capacity(current.len() + given.len() + 32);
    content.extend_from_slice(b"<<<<<<< HEAD\n");
    content.extend_from_slice(current);
    content.extend_from_slice(b"\n=======\n");
    content.extend_from_slice(given);
    content.extend_from_slice(b"\n>>>>>>>\n");

    Bytes::from(content)
}

/// Resolutions for every file name seen in any of the three snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    resolutions: BTreeMap<String, FileResolution>,
}

impl MergePlan {
    pub fn build(split: &TrackedFiles, current: &TrackedFiles, given: &TrackedFiles) -> Self {
        let resolutions = split
            .keys()
            .chain(current.keys())
            .chain(given.keys())
            .map(|name| {
                let resolution = resolve(split.get(name), current.get(name), given.get(name));
                (name.clone(), resolution)
            })
            .collect();

        MergePlan { resolutions }
    }

    pub fn resolution(&self, name: &str) -> Option<&FileResolution> {
        self.resolutions.get(name)
    }

    /// Resolutions that change the working tree, in file name order
    pub fn actions(&self) -> impl Iterator<Item = (&String, &FileResolution)> {
        self.resolutions
            .iter()
            .filter(|(_, resolution)| resolution.is_actionable())
    }

    pub fn has_conflicts(&self) -> bool {
        self.resolutions
            .values()
            .any(|resolution| matches!(resolution, FileResolution::Conflict { .. }))
    }
}
