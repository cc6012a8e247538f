//! References (branches, HEAD, remotes)
//!
//! `RefTable` is the in-memory view commands work against: every branch and
//! the commit it points at, which branch is current, and the configured
//! remotes. `head` always equals the current branch's commit.
//!
//! `Refs` maps the table onto `.twig`:
//!
//! - `HEAD`: `ref: refs/heads/<branch>`
//! - `refs/heads/<branch>`: a commit id; hierarchical names become directories
//! - `remotes/<name>`: the remote's location
//!
//! Saving rewrites only the files whose content changed, each under an
//! exclusive lock, and removes files of branches and remotes that are gone.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Existing, Missing, RepositoryError};
use anyhow::Context;
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

const HEADS_PREFIX: &str = "refs/heads/";

static SYMREF_REGEX: LazyLock<Result<regex::Regex, regex::Error>> =
    LazyLock::new(|| regex::Regex::new(r"^ref: (.+)$"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefTable {
    current: BranchName,
    head: ObjectId,
    branches: BTreeMap<BranchName, ObjectId>,
    remotes: BTreeMap<String, PathBuf>,
}

impl RefTable {
    /// A fresh table: the default branch at `root`, no remotes
    pub fn new(root: ObjectId) -> Self {
        let current = BranchName::default_branch();
        RefTable {
            branches: BTreeMap::from([(current.clone(), root.clone())]),
            current,
            head: root,
            remotes: BTreeMap::new(),
        }
    }

    pub fn from_parts(
        current: BranchName,
        branches: BTreeMap<BranchName, ObjectId>,
        remotes: BTreeMap<String, PathBuf>,
    ) -> anyhow::Result<Self> {
        let head = branches
            .get(&current)
            .cloned()
            .with_context(|| format!("HEAD points at missing branch {current}"))?;

        Ok(RefTable {
            current,
            head,
            branches,
            remotes,
        })
    }

    pub fn head(&self) -> &ObjectId {
        &self.head
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current
    }

    pub fn branch(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn branches(&self) -> &BTreeMap<BranchName, ObjectId> {
        &self.branches
    }

    pub fn remote(&self, name: &str) -> Option<&Path> {
        self.remotes.get(name).map(PathBuf::as_path)
    }

    pub fn remotes(&self) -> &BTreeMap<String, PathBuf> {
        &self.remotes
    }

    pub fn create_branch(&mut self, name: BranchName, target: ObjectId) -> anyhow::Result<()> {
        if self.branches.contains_key(&name) {
            anyhow::bail!(RepositoryError::AlreadyExists(
                Existing::Branch,
                name.to_string()
            ));
        }
        self.ensure_no_path_clash(&name)?;

        self.branches.insert(name, target);
        Ok(())
    }

    pub fn delete_branch(&mut self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if !self.branches.contains_key(name) {
            anyhow::bail!(RepositoryError::NotFound(Missing::Branch, name.to_string()));
        }
        if name == &self.current {
            anyhow::bail!(RepositoryError::CannotRemoveCurrentBranch);
        }

        self.branches
            .remove(name)
            .with_context(|| format!("branch {name} vanished"))
    }

    /// Create or move a branch; moving the current branch moves head too
    pub fn set_branch(&mut self, name: BranchName, target: ObjectId) -> anyhow::Result<()> {
        if !self.branches.contains_key(&name) {
            self.ensure_no_path_clash(&name)?;
        }
        if name == self.current {
            self.head = target.clone();
        }

        self.branches.insert(name, target);
        Ok(())
    }

    /// Move the current branch (and head) to `target`
    pub fn advance_head(&mut self, target: ObjectId) {
        self.branches.insert(self.current.clone(), target.clone());
        self.head = target;
    }

    pub fn switch_branch(&mut self, name: BranchName) -> anyhow::Result<()> {
        let head = self
            .branches
            .get(&name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(Missing::Branch, name.to_string()))?;

        self.current = name;
        self.head = head;
        Ok(())
    }

    pub fn add_remote(&mut self, name: &str, location: PathBuf) -> anyhow::Result<()> {
        Self::validate_remote_name(name)?;
        if self.remotes.contains_key(name) {
            anyhow::bail!(RepositoryError::AlreadyExists(
                Existing::Remote,
                name.to_string()
            ));
        }

        self.remotes.insert(name.to_string(), location);
        Ok(())
    }

    pub fn remove_remote(&mut self, name: &str) -> anyhow::Result<PathBuf> {
        self.remotes
            .remove(name)
            .ok_or_else(|| RepositoryError::NotFound(Missing::Remote, name.to_string()).into())
    }

    fn validate_remote_name(name: &str) -> anyhow::Result<()> {
        // remote names become a single file under .twig/remotes
        if name.contains('/') {
            anyhow::bail!(RepositoryError::InvalidBranchName(name.to_string()));
        }
        BranchName::try_parse(name)?;
        Ok(())
    }

    /// `a` and `a/b` cannot coexist: one would be a file, the other a directory
    fn ensure_no_path_clash(&self, name: &BranchName) -> anyhow::Result<()> {
        let clashes = self.branches.keys().any(|existing| {
            let (existing, name) = (existing.as_ref(), name.as_ref());
            existing
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('/'))
                || name
                    .strip_prefix(existing)
                    .is_some_and(|rest| rest.starts_with('/'))
        });

        if clashes {
            anyhow::bail!(RepositoryError::InvalidBranchName(name.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Refs {
    /// Path to the repository directory (`.twig`)
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    pub fn load(&self) -> anyhow::Result<RefTable> {
        let current = self.read_head()?;
        let branches = self.read_branches()?;
        let remotes = self.read_remotes()?;

        RefTable::from_parts(current, branches, remotes)
    }

    /// Make the files under `.twig` match `table`
    pub fn save(&self, table: &RefTable) -> anyhow::Result<()> {
        let on_disk = self.read_branches()?;
        for name in on_disk.keys().filter(|name| table.branch(name).is_none()) {
            self.delete_ref_file(&self.heads_path().join(name.as_ref()))?;
        }
        for (name, oid) in table.branches() {
            if on_disk.get(name) != Some(oid) {
                self.update_ref_file(self.heads_path().join(name.as_ref()), oid.to_string())?;
            }
        }

        let head = format!("ref: {HEADS_PREFIX}{}", table.current_branch());
        if std::fs::read_to_string(self.head_path()).ok().as_deref() != Some(head.as_str()) {
            self.update_ref_file(self.head_path(), head)?;
        }

        let remotes_on_disk = self.read_remotes()?;
        for name in remotes_on_disk.keys().filter(|name| table.remote(name).is_none()) {
            self.delete_ref_file(&self.remotes_path().join(name))?;
        }
        for (name, location) in table.remotes() {
            if remotes_on_disk.get(name) != Some(location) {
                self.update_ref_file(
                    self.remotes_path().join(name),
                    location.to_string_lossy().into_owned(),
                )?;
            }
        }

        Ok(())
    }

    fn read_head(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        let symref = SYMREF_REGEX
            .as_ref()
            .map_err(Clone::clone)?
            .captures(content.trim())
            .and_then(|captures| captures.get(1))
            .map(|target| target.as_str().to_string())
            .with_context(|| format!("HEAD is not a symbolic ref: {}", content.trim()))?;
        let branch = symref
            .strip_prefix(HEADS_PREFIX)
            .with_context(|| format!("HEAD must point under {HEADS_PREFIX}, got {symref}"))?;

        BranchName::try_parse(branch)
    }

    fn read_branches(&self) -> anyhow::Result<BTreeMap<BranchName, ObjectId>> {
        let heads_path = self.heads_path();
        let mut branches = BTreeMap::new();

        for entry in WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
        {
            let relative_path = entry.path().strip_prefix(&heads_path)?;
            let name = relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let content = std::fs::read_to_string(entry.path())
                .with_context(|| format!("failed to read ref file at {:?}", entry.path()))?;
            branches.insert(
                BranchName::try_parse(name)?,
                ObjectId::try_parse(content.trim().to_string())?,
            );
        }

        Ok(branches)
    }

    fn read_remotes(&self) -> anyhow::Result<BTreeMap<String, PathBuf>> {
        let remotes_path = self.remotes_path();
        let mut remotes = BTreeMap::new();
        if !remotes_path.is_dir() {
            return Ok(remotes);
        }

        for entry in std::fs::read_dir(&remotes_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let location = std::fs::read_to_string(entry.path())?;
            remotes.insert(
                entry.file_name().to_string_lossy().into_owned(),
                PathBuf::from(location.trim_end_matches('\n')),
            );
        }

        Ok(remotes)
    }

    pub fn update_ref_file(&self, path: PathBuf, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn delete_ref_file(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::remove_file(path)
            .with_context(|| format!("failed to delete ref file at {:?}", path))?;
        self.prune_empty_parent_dirs(path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_path()
            && parent != self.remotes_path().as_path()
            && parent.starts_with(self.path.as_ref())
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent)
                .with_context(|| format!("failed to remove empty ref directory at {:?}", parent))?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    pub fn remotes_path(&self) -> PathBuf {
        self.path.join("remotes")
    }
}
