use crate::areas::repository::Repository;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// Print the id of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut matches = Vec::new();
        for commit_id in self.database().commit_ids()? {
            if self.database().get_commit(&commit_id)?.message() == message {
                matches.push(commit_id);
            }
        }

        if matches.is_empty() {
            anyhow::bail!(RepositoryError::NoMatchingCommit);
        }

        let mut writer = self.writer();
        for commit_id in matches {
            writeln!(writer, "{commit_id}")?;
        }

        Ok(())
    }
}
