use crate::areas::repository::Repository;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub fn reset(&mut self, commit: &str) -> anyhow::Result<()> {
        let target_id = self.database().resolve_prefix(commit)?;

        self.migrate_to(&target_id)?;
        self.refs_mut().advance_head(target_id);
        self.index_mut().clear();

        Ok(())
    }
}
