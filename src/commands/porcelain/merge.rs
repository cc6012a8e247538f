use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::conflict::untracked_in_the_way;
use crate::artifacts::merge::resolution::{FileResolution, MergePlan, conflict_markers};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Missing, RepositoryError};
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch was already part of the current history
    AlreadyMerged,
    FastForward(ObjectId),
    Merged { commit: ObjectId, conflicts: bool },
}

impl Repository {
    pub fn merge(&mut self, branch: &str) -> anyhow::Result<MergeOutcome> {
        if !self.index().is_empty() {
            anyhow::bail!(RepositoryError::UncommittedChanges);
        }

        let not_found = || RepositoryError::NotFound(Missing::Branch, branch.to_string());
        let given_name = BranchName::try_parse(branch).map_err(|_| not_found())?;
        let given_id = self
            .refs()
            .branch(&given_name)
            .cloned()
            .ok_or_else(not_found)?;
        if &given_name == self.refs().current_branch() {
            anyhow::bail!(RepositoryError::SelfMerge);
        }

        let current_id = self.refs().head().clone();
        let current = self.database().get_commit(&current_id)?;
        let given = self.database().get_commit(&given_id)?;

        let working_files = self.workspace().list_files()?;
        let in_the_way = untracked_in_the_way(&working_files, current.tracked(), given.tracked());
        if !in_the_way.is_empty() {
            anyhow::bail!(RepositoryError::UntrackedOverwrite(in_the_way));
        }

        let split_id = {
            let database = self.database();
            SplitPointFinder::new(|commit_id| database.get_slim_commit(commit_id))
                .find_split_point(&current_id, &given_id)?
                .with_context(|| format!("{current_id} and {given_id} share no history"))?
        };

        if split_id == given_id {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(MergeOutcome::AlreadyMerged);
        }

        if split_id == current_id {
            self.migrate_to(&given_id)?;
            self.refs_mut().advance_head(given_id.clone());
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(MergeOutcome::FastForward(given_id));
        }

        let split = self.database().get_commit(&split_id)?;
        let plan = MergePlan::build(split.tracked(), current.tracked(), given.tracked());
        for (name, resolution) in plan.actions() {
            debug!(file = %name, ?resolution, "merge resolution");
            self.apply_resolution(name, resolution)?;
        }

        let message = format!(
            "Merged {given_name} into {}.",
            self.refs().current_branch()
        );
        self.set_pending_merge(given_id);
        let commit_id = self.write_commit(&message)?;

        let conflicts = plan.has_conflicts();
        if conflicts {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(MergeOutcome::Merged {
            commit: commit_id,
            conflicts,
        })
    }

    fn apply_resolution(&mut self, name: &str, resolution: &FileResolution) -> anyhow::Result<()> {
        match resolution {
            FileResolution::TakeGiven(blob_id) => {
                let blob = self.database().get_blob(blob_id)?;
                self.workspace().write_file(name, blob.content())?;
                self.index_mut()
                    .stage_addition(name.to_string(), blob_id.clone());
            }
            FileResolution::RemoveLocally => {
                self.workspace().remove_file(name)?;
                self.index_mut().stage_removal(name.to_string());
            }
            FileResolution::Conflict { current, given } => {
                let marked = conflict_markers(
                    &self.blob_content(current.as_ref())?,
                    &self.blob_content(given.as_ref())?,
                );
                self.workspace().write_file(name, &marked)?;
                let blob_id = self.database_mut().put_blob(marked)?;
                self.index_mut().stage_addition(name.to_string(), blob_id);
            }
            FileResolution::Unchanged | FileResolution::KeepCurrent => {}
        }

        Ok(())
    }

    fn blob_content(&self, blob_id: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match blob_id {
            Some(blob_id) => Ok(self.database().get_blob(blob_id)?.into_content()),
            None => Ok(Bytes::new()),
        }
    }
}
