use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Missing, RepositoryError};
use std::io::Write;

impl Repository {
    /// Restore one file from `commit` (the head when absent); staging is
    /// left alone
    pub fn checkout_file(&mut self, commit: Option<&str>, file: &str) -> anyhow::Result<()> {
        let commit_id = match commit {
            Some(prefix) => self.database().resolve_prefix(prefix)?,
            None => self.refs().head().clone(),
        };
        let commit = self.database().get_commit(&commit_id)?;

        let not_in_commit = || RepositoryError::FileNotInCommit(file.to_string());
        let name = self
            .workspace()
            .normalize(file)
            .map_err(|_| not_in_commit())?;
        let blob_id = commit.blob_for(&name).ok_or_else(not_in_commit)?;

        let blob = self.database().get_blob(blob_id)?;
        self.workspace().write_file(&name, blob.content())
    }

    /// Switch to `branch`, replacing the tracked files with its snapshot
    pub fn checkout_branch(&mut self, branch: &str) -> anyhow::Result<()> {
        let not_found = || RepositoryError::NotFound(Missing::Branch, branch.to_string());
        let branch_name = BranchName::try_parse(branch).map_err(|_| not_found())?;
        let target_id = self
            .refs()
            .branch(&branch_name)
            .cloned()
            .ok_or_else(not_found)?;

        if &branch_name == self.refs().current_branch() {
            anyhow::bail!(RepositoryError::SameBranchCheckout);
        }

        self.migrate_to(&target_id)?;
        self.refs_mut().switch_branch(branch_name)?;
        self.index_mut().clear();

        writeln!(self.writer(), "Switched to branch '{branch}'")?;

        Ok(())
    }

    /// Move the working tree from the head's snapshot to `target_id`'s
    ///
    /// Fails with `UntrackedOverwrite` before touching any file.
    pub(crate) fn migrate_to(&mut self, target_id: &ObjectId) -> anyhow::Result<()> {
        let current = self.head_commit()?;
        let target = self.database().get_commit(target_id)?;
        let working_files = self.workspace().list_files()?;

        let migration = Migration::plan(&current, &target, &working_files)?;
        self.workspace().apply_migration(&migration, self.database())
    }
}
