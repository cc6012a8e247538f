use crate::areas::database::{Database, ObjectStore};
use crate::areas::index::Index;
use crate::areas::refs::{RefTable, Refs};
use crate::areas::workspace::{REPOSITORY_DIR, Workspace};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use tracing::debug;

/// Everything one command needs, passed around explicitly
///
/// Commands mutate only in-memory state (buffered objects, the reference
/// table, the staging index) and the working tree. Nothing under `.twig`
/// changes until `flush`, so a command that fails leaves the repository as it
/// found it.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Box<dyn ObjectStore>,
    workspace: Workspace,
    refs: Refs,
    ref_table: RefTable,
    index: Index,
    /// Second parent of the commit being assembled by a merge
    pending_merge: Option<ObjectId>,
}

impl Repository {
    /// Open the repository whose working tree root is `path`
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to access {}", path.display()))?;
        let repository_path = path.join(REPOSITORY_DIR);

        if !repository_path.is_dir() {
            anyhow::bail!(RepositoryError::NotInitialized);
        }

        let refs = Refs::new(repository_path.clone().into_boxed_path());
        let ref_table = refs.load()?;

        let mut index = Index::new(repository_path.join("index").into_boxed_path());
        index.rehydrate()?;

        Ok(Self::assemble(path.into_boxed_path(), writer, refs, ref_table, index))
    }

    /// Lay out `.twig` under `path` and return a repository holding only the
    /// root commit; nothing is written until `flush`
    pub fn create(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to access {}", path.display()))?;
        let repository_path = path.join(REPOSITORY_DIR);

        if repository_path.exists() {
            anyhow::bail!(RepositoryError::AlreadyInitialized);
        }

        let refs = Refs::new(repository_path.clone().into_boxed_path());
        let root_id = Commit::root().object_id()?;
        let index = Index::new(repository_path.join("index").into_boxed_path());

        let mut repository = Self::assemble(
            path.into_boxed_path(),
            writer,
            refs,
            RefTable::new(root_id),
            index,
        );
        repository.database.put_commit(&Commit::root())?;

        std::fs::create_dir_all(repository.database_path())
            .context("Failed to create .twig/objects directory")?;
        std::fs::create_dir_all(repository.refs.heads_path())
            .context("Failed to create .twig/refs/heads directory")?;

        Ok(repository)
    }

    fn assemble(
        path: Box<Path>,
        writer: Box<dyn std::io::Write>,
        refs: Refs,
        ref_table: RefTable,
        index: Index,
    ) -> Self {
        let database = Database::new(path.join(REPOSITORY_DIR).join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone());

        Repository {
            path,
            writer: RefCell::new(writer),
            database: Box::new(database),
            workspace,
            refs,
            ref_table,
            index,
            pending_merge: None,
        }
    }

    /// Persist buffered objects, then the staging index, then references
    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.database.flush()?;
        self.index.write_updates()?;
        self.refs.save(&self.ref_table)?;
        self.writer.borrow_mut().flush()?;

        debug!(path = %self.path.display(), "repository flushed");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn database_path(&self) -> Box<Path> {
        self.path
            .join(REPOSITORY_DIR)
            .join("objects")
            .into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &dyn ObjectStore {
        self.database.as_ref()
    }

    pub fn database_mut(&mut self) -> &mut dyn ObjectStore {
        self.database.as_mut()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &RefTable {
        &self.ref_table
    }

    pub fn refs_mut(&mut self) -> &mut RefTable {
        &mut self.ref_table
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn pending_merge(&self) -> Option<&ObjectId> {
        self.pending_merge.as_ref()
    }

    pub fn set_pending_merge(&mut self, second_parent: ObjectId) {
        self.pending_merge = Some(second_parent);
    }

    pub fn take_pending_merge(&mut self) -> Option<ObjectId> {
        self.pending_merge.take()
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.get_commit(self.ref_table.head())
    }

    /// Blob id the working copy of `name` would get, without storing it
    pub fn working_blob_id(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        self.workspace
            .try_read_file(name)?
            .map(|content| Blob::new(content).object_id())
            .transpose()
    }
}
