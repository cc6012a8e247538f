use crate::areas::repository::Repository;
use crate::artifacts::log::log_chain::LogChain;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// History of the current branch along first parents, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        for entry in LogChain::new(self.database(), self.refs().head().clone()) {
            let (commit_id, commit) = entry?;
            self.show_commit(&commit_id, &commit)?;
        }

        Ok(())
    }

    /// Every commit in the object store, in id order
    pub fn global_log(&self) -> anyhow::Result<()> {
        for commit_id in self.database().commit_ids()? {
            let commit = self.database().get_commit(&commit_id)?;
            self.show_commit(&commit_id, &commit)?;
        }

        Ok(())
    }

    fn show_commit(&self, commit_id: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "{}", format!("commit {commit_id}").yellow())?;
        if let (Some(first), Some(second)) = (commit.first_parent(), commit.second_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
