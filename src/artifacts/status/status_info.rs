use crate::areas::index::Index;
use crate::areas::refs::RefTable;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::TrackedFiles;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChange;
use colored::Colorize;
use std::collections::{BTreeMap, BTreeSet};

/// Working file name → blob id of its current content
pub type WorkingFiles = BTreeMap<String, ObjectId>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub(crate) current_branch: BranchName,
    pub(crate) branches: Vec<BranchName>,
    pub(crate) staged: Vec<String>,
    pub(crate) removed: Vec<String>,
    pub(crate) modifications: BTreeMap<String, WorkspaceChange>,
    pub(crate) untracked: BTreeSet<String>,
}

impl StatusReport {
    pub fn inspect(
        refs: &RefTable,
        index: &Index,
        head: &TrackedFiles,
        working: &WorkingFiles,
    ) -> Self {
        let mut modifications = BTreeMap::new();

        // tracked by head, changed or gone, and nothing staged about it
        for (name, blob_id) in head {
            if index.staged_addition(name).is_some() || index.is_staged_for_removal(name) {
                continue;
            }
            match working.get(name) {
                None => {
                    modifications.insert(name.clone(), WorkspaceChange::Deleted);
                }
                Some(working_id) if working_id != blob_id => {
                    modifications.insert(name.clone(), WorkspaceChange::Modified);
                }
                Some(_) => {}
            }
        }

        // staged content that no longer matches the working copy
        for (name, staged_id) in index.additions() {
            match working.get(name) {
                None => {
                    modifications.insert(name.clone(), WorkspaceChange::Deleted);
                }
                Some(working_id) if working_id != staged_id => {
                    modifications.insert(name.clone(), WorkspaceChange::Modified);
                }
                Some(_) => {}
            }
        }

        let untracked = working
            .keys()
            .filter(|name| {
                index.staged_addition(name).is_none()
                    && (!head.contains_key(*name) || index.is_staged_for_removal(name))
            })
            .cloned()
            .collect();

        StatusReport {
            current_branch: refs.current_branch().clone(),
            branches: refs.branches().keys().cloned().collect(),
            staged: index.additions().keys().cloned().collect(),
            removed: index.removals().iter().cloned().collect(),
            modifications,
            untracked,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.removed.is_empty()
            && self.modifications.is_empty()
            && self.untracked.is_empty()
    }

    fn write_section(
        f: &mut std::fmt::Formatter<'_>,
        title: &str,
        entries: impl Iterator<Item = String>,
    ) -> std::fmt::Result {
        writeln!(f, "=== {title} ===")?;
        for entry in entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f)
    }
}

impl std::fmt::Display for StatusReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Self::write_section(
            f,
            "Branches",
            self.branches.iter().map(|branch| {
                if branch == &self.current_branch {
                    format!("*{}", branch.as_ref().green())
                } else {
                    branch.to_string()
                }
            }),
        )?;
        Self::write_section(
            f,
            "Staged Files",
            self.staged.iter().map(|name| name.green().to_string()),
        )?;
        Self::write_section(
            f,
            "Removed Files",
            self.removed.iter().map(|name| name.red().to_string()),
        )?;
        Self::write_section(
            f,
            "Modifications Not Staged For Commit",
            self.modifications
                .iter()
                .map(|(name, change)| format!("{name} {change}")),
        )?;
        Self::write_section(
            f,
            "Untracked Files",
            self.untracked.iter().map(|name| name.red().to_string()),
        )
    }
}
