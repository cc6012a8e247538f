use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::sync::transfer::copy_missing_closure;
use crate::errors::{Missing, RepositoryError};
use tracing::info;

impl Repository {
    /// Copy `branch` of remote `remote_name` into the tracking branch
    /// `<remote>/<branch>`, returning the tracking branch name
    pub fn fetch(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<BranchName> {
        let remote = self.open_remote(remote_name)?;

        let not_found = || RepositoryError::NotFound(Missing::RemoteBranch, branch.to_string());
        let branch_name = BranchName::try_parse(branch).map_err(|_| not_found())?;
        let remote_head = remote
            .refs()
            .branch(&branch_name)
            .cloned()
            .ok_or_else(not_found)?;

        let stats = copy_missing_closure(remote.database(), self.database_mut(), &remote_head)?;

        let tracking = BranchName::remote_tracking(remote_name, &branch_name)?;
        self.refs_mut().set_branch(tracking.clone(), remote_head)?;

        info!(
            tracking = %tracking,
            commits = stats.commits,
            blobs = stats.blobs,
            "fetched"
        );

        Ok(tracking)
    }
}
