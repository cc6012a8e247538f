use crate::areas::repository::Repository;
use crate::artifacts::core::config;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use tracing::debug;

impl Repository {
    /// Record a commit on the current branch and clear the staging index
    ///
    /// The snapshot starts from the head's files, takes staged additions and
    /// drops staged removals. Tracked files whose working copy was edited
    /// since are recorded with their current content; a tracked file missing
    /// from the working tree keeps its recorded blob. A pending merge parent
    /// becomes the second parent.
    pub fn write_commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        let head_id = self.refs().head().clone();
        let mut tracked = self.head_commit()?.tracked().clone();

        for (name, blob_id) in self.index().additions() {
            tracked.insert(name.clone(), blob_id.clone());
        }
        for name in self.index().removals() {
            tracked.remove(name);
        }

        for (name, blob_id) in tracked.iter_mut() {
            if let Some(content) = self.workspace().try_read_file(name)? {
                *blob_id = self.database_mut().put_blob(content)?;
            }
        }

        let commit = Commit::new(
            message.to_string(),
            config::commit_timestamp()?,
            tracked,
            Some(head_id),
            self.take_pending_merge(),
        );
        let commit_id = self.database_mut().put_commit(&commit)?;

        self.refs_mut().advance_head(commit_id.clone());
        self.index_mut().clear();

        debug!(
            commit = %commit_id.to_short_oid(),
            files = commit.tracked().len(),
            merge = commit.is_merge(),
            "commit written"
        );

        Ok(commit_id)
    }
}
