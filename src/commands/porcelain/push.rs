use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::log::log_chain::LogChain;
use crate::artifacts::sync::transfer::copy_missing_closure;
use crate::errors::RepositoryError;
use tracing::info;

impl Repository {
    /// Publish the current head as `branch` of remote `remote_name`
    ///
    /// The remote branch must sit on this repository's first-parent history;
    /// a branch the remote lacks starts from the remote's head. When the
    /// branch is checked out in the remote, its working tree and staging
    /// index follow the new head. The remote is persisted here, this
    /// repository is not changed.
    pub fn push(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<()> {
        let mut remote = self.open_remote(remote_name)?;
        let branch_name = BranchName::try_parse(branch)?;

        let local_head = self.refs().head().clone();
        let remote_head = remote
            .refs()
            .branch(&branch_name)
            .unwrap_or_else(|| remote.refs().head())
            .clone();

        if !LogChain::new(self.database(), local_head.clone()).contains(&remote_head)? {
            anyhow::bail!(RepositoryError::DivergedHistory);
        }

        let stats = copy_missing_closure(self.database(), remote.database_mut(), &local_head)?;

        if remote.refs().current_branch() == &branch_name {
            remote.migrate_to(&local_head)?;
            remote.index_mut().clear();
        }
        remote.refs_mut().set_branch(branch_name, local_head.clone())?;
        remote.flush()?;

        info!(
            remote = remote_name,
            head = %local_head.to_short_oid(),
            commits = stats.commits,
            "pushed"
        );

        Ok(())
    }
}
