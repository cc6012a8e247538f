use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Missing, RepositoryError};

impl Repository {
    /// Create `name` at the head commit without switching to it
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name)?;
        let head = self.refs().head().clone();

        self.refs_mut().create_branch(branch_name, head)
    }

    /// Delete the pointer `name`; its commits stay in the store
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name)
            .map_err(|_| RepositoryError::NotFound(Missing::Branch, name.to_string()))?;

        self.refs_mut().delete_branch(&branch_name)?;
        Ok(())
    }
}
