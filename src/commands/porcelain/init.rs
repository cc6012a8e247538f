use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Create a repository at `path` holding only the root commit on `master`
    pub fn init(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let repository = Self::create(path, writer)?;

        writeln!(
            repository.writer(),
            "Initialized empty twig repository in {}",
            repository.path().display()
        )?;

        Ok(repository)
    }
}
