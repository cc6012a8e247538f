use crate::areas::repository::Repository;
use crate::errors::RepositoryError;

impl Repository {
    /// Unstage `file`, or stage its removal and delete the working copy when
    /// the head tracks it
    pub fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        let name = self.workspace().normalize(file)?;

        if self.index().staged_addition(&name).is_some() {
            self.index_mut().unstage(&name);
            return Ok(());
        }

        if !self.head_commit()?.tracks(&name) {
            anyhow::bail!(RepositoryError::NothingToRemove(name));
        }

        self.index_mut().stage_removal(name.clone());
        self.workspace().remove_file(&name)
    }
}
