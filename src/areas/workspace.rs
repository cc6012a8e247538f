use crate::areas::database::ObjectStore;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Name of the repository directory inside the working tree
pub const REPOSITORY_DIR: &str = ".twig";

/// The working tree: plain files under the repository root
///
/// File names are relative to the root and always use `/` as separator,
/// matching the names recorded in commits.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user-supplied file name into a tracked-file name
    ///
    /// Names that would leave the working tree or reach into `.twig` are
    /// treated as nonexistent.
    pub fn normalize(&self, name: &str) -> anyhow::Result<String> {
        let mut components = Vec::new();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => components.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => anyhow::bail!(RepositoryError::FileNotFound(name.to_string())),
            }
        }

        if components.is_empty()
            || components[0] == REPOSITORY_DIR
            || !Self::is_recordable(name)
        {
            anyhow::bail!(RepositoryError::FileNotFound(name.to_string()));
        }

        Ok(components.join("/"))
    }

    /// Commits store one name per line
    fn is_recordable(name: &str) -> bool {
        !name.contains(['\n', '\r'])
    }

    fn file_path(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.path.to_path_buf(), |path, part| path.join(part))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }

    /// Every regular file in the working tree, `.twig` excluded
    pub fn list_files(&self) -> anyhow::Result<BTreeSet<String>> {
        let mut files = BTreeSet::new();

        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.depth() != 1 || entry.file_name() != REPOSITORY_DIR);

        for entry in walker {
            let entry = entry.with_context(|| {
                format!("Failed to walk working tree at {}", self.path.display())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry.path().strip_prefix(&self.path)?;
            let name = relative_path
                .components()
                .map(|component| component.as_os_str().to_str())
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.join("/"));

            match name {
                Some(name) if Self::is_recordable(&name) => {
                    files.insert(name);
                }
                _ => debug!(path = %relative_path.display(), "skipping unrecordable file name"),
            }
        }

        Ok(files)
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        self.try_read_file(name)?
            .ok_or_else(|| RepositoryError::FileNotFound(name.to_string()).into())
    }

    pub fn try_read_file(&self, name: &str) -> anyhow::Result<Option<Bytes>> {
        let path = self.file_path(name);
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Some(Bytes::from(content)))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let path = self.file_path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {}", path.display()))
    }

    /// Delete a file if present and prune directories it leaves empty
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let path = self.file_path(name);
        if !path.is_file() {
            return Ok(());
        }

        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove file: {}", path.display()))?;
        self.prune_empty_parent_dirs(&path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.starts_with(&self.path)
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("Failed to remove directory: {}", parent.display()))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    // Deletions go first so that a directory emptied by them can be
    // replaced by a file of the same name.
    pub fn apply_migration(
        &self,
        migration: &Migration,
        store: &dyn ObjectStore,
    ) -> anyhow::Result<()> {
        for (name, _) in migration.files(ActionType::Delete) {
            self.remove_file(name)?;
        }

        for action in [ActionType::Modify, ActionType::Add] {
            for (name, blob_id) in migration.files(action) {
                let blob_id = blob_id
                    .as_ref()
                    .with_context(|| format!("No blob planned for {name}"))?;
                let blob = store.get_blob(blob_id)?;
                self.write_file(name, blob.content())?;
            }
        }

        Ok(())
    }
}
