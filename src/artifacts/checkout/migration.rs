//! Working tree migration between two snapshots
//!
//! Files tracked only by the source snapshot are deleted, files tracked by the
//! target are written (new ones as `Add`, shared ones as `Modify`). Files
//! neither snapshot tracks are left alone.

use crate::artifacts::checkout::conflict::untracked_in_the_way;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    Add,
    Delete,
    Modify,
}

/// Planned actions grouped by type; deletions carry no blob
pub type ActionsSet = BTreeMap<ActionType, Vec<(String, Option<ObjectId>)>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    actions: ActionsSet,
}

impl Migration {
    /// Plan the move from `current` to `target`
    ///
    /// Fails with `UntrackedOverwrite` before planning anything if an
    /// untracked working file is in the way.
    pub fn plan(
        current: &Commit,
        target: &Commit,
        working_files: &BTreeSet<String>,
    ) -> anyhow::Result<Self> {
        let in_the_way = untracked_in_the_way(working_files, current.tracked(), target.tracked());
        if !in_the_way.is_empty() {
            anyhow::bail!(RepositoryError::UntrackedOverwrite(in_the_way));
        }

        let mut actions = ActionsSet::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        for name in current.tracked().keys() {
            if !target.tracks(name) {
                actions
                    .entry(ActionType::Delete)
                    .or_default()
                    .push((name.clone(), None));
            }
        }

        for (name, blob_id) in target.tracked() {
            let action = if current.tracks(name) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            actions
                .entry(action)
                .or_default()
                .push((name.clone(), Some(blob_id.clone())));
        }

        Ok(Migration { actions })
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    pub fn files(&self, action: ActionType) -> &[(String, Option<ObjectId>)] {
        self.actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
