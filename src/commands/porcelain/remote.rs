use crate::areas::repository::Repository;
use crate::areas::workspace::REPOSITORY_DIR;
use crate::errors::{Missing, RepositoryError};
use std::path::PathBuf;

impl Repository {
    pub fn add_remote(&mut self, name: &str, location: &str) -> anyhow::Result<()> {
        self.refs_mut().add_remote(name, PathBuf::from(location))
    }

    pub fn rm_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.refs_mut().remove_remote(name)?;
        Ok(())
    }

    /// Open the repository registered as remote `name`
    ///
    /// The recorded location is either the remote's working tree root or its
    /// `.twig` directory, absolute or relative to this repository's root.
    /// The remote's own output is discarded.
    pub fn open_remote(&self, name: &str) -> anyhow::Result<Repository> {
        let location = self
            .refs()
            .remote(name)
            .ok_or_else(|| RepositoryError::NotFound(Missing::Remote, name.to_string()))?;

        let location = if location.is_absolute() {
            location.to_path_buf()
        } else {
            self.path().join(location)
        };
        let root = match location.file_name() {
            Some(file_name) if file_name == REPOSITORY_DIR => location
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| location.clone()),
            _ => location.clone(),
        };

        if !root.join(REPOSITORY_DIR).is_dir() {
            anyhow::bail!(RepositoryError::RemoteNotFound(
                location.display().to_string()
            ));
        }

        Repository::open(&root, Box::new(std::io::sink()))
    }
}
