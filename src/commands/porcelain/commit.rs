use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.trim().is_empty() {
            anyhow::bail!(RepositoryError::EmptyMessage);
        }
        if self.index().is_empty() && self.pending_merge().is_none() {
            anyhow::bail!(RepositoryError::NothingToCommit);
        }

        let commit_id = self.write_commit(message)?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.refs().current_branch(),
            commit_id.to_short_oid(),
            message.lines().next().unwrap_or_default()
        )?;

        Ok(())
    }
}
