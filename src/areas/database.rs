//! Object store
//!
//! `ObjectStore` is the seam every higher layer talks to: a few raw byte-level
//! operations that a backend implements, and the typed operations (blobs,
//! commits, prefix resolution) built on top of them. `Database` is the on-disk
//! backend rooted at `.twig/objects`; `MemoryStore` lives in `areas::memory`.
//!
//! `Database` never touches the disk on write. New objects are buffered and
//! reads consult the buffer first, so a command that fails half-way leaves the
//! repository untouched; `flush` persists the buffer.

use crate::areas::memory::MemoryStore;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Missing, RepositoryError};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait ObjectStore {
    fn contains(&self, object_id: &ObjectId) -> anyhow::Result<bool>;

    /// Uncompressed `<type> <size>\0<body>` bytes of an object
    fn read_raw(&self, object_id: &ObjectId) -> anyhow::Result<Bytes>;

    /// Record an object under `object_id`; a no-op when it is already present
    fn write_raw(&mut self, object_id: ObjectId, content: Bytes) -> anyhow::Result<()>;

    /// Ids of every object whose hex form starts with `prefix`, sorted
    fn ids_with_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>>;

    fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn store(&mut self, object: &dyn Object) -> anyhow::Result<ObjectId> {
        let content = object.serialize()?;
        let object_id = ObjectId::digest(&content);

        if !self.contains(&object_id)? {
            self.write_raw(object_id.clone(), content)?;
        }

        Ok(object_id)
    }

    fn put_blob(&mut self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content))
    }

    fn put_commit(&mut self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.store(commit)
    }

    fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let mut reader = Cursor::new(self.read_raw(object_id)?);
        ObjectType::parse_object_type(&mut reader)
    }

    fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let mut reader = Cursor::new(self.read_raw(object_id)?);

        match ObjectType::parse_object_type(&mut reader)? {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(reader)?))),
        }
    }

    fn get_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        match self.parse_object(object_id)? {
            ObjectBox::Blob(blob) => Ok(*blob),
            ObjectBox::Commit(_) => {
                anyhow::bail!(RepositoryError::NotFound(
                    Missing::Object,
                    object_id.to_string()
                ))
            }
        }
    }

    fn get_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        match self.parse_object(object_id)? {
            ObjectBox::Commit(commit) => Ok(*commit),
            ObjectBox::Blob(_) => {
                anyhow::bail!(RepositoryError::NotFound(
                    Missing::Commit,
                    object_id.to_string()
                ))
            }
        }
    }

    fn get_slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        Ok(self.get_commit(object_id)?.slim(object_id.clone()))
    }

    /// Expand an abbreviated commit id
    ///
    /// Only commits are candidates, so a blob sharing the prefix never makes
    /// it ambiguous.
    fn resolve_prefix(&self, partial: &str) -> anyhow::Result<ObjectId> {
        let not_found = || RepositoryError::NotFound(Missing::Commit, partial.to_string());

        if partial.is_empty() || !ObjectId::is_valid_prefix(partial) {
            anyhow::bail!(not_found());
        }

        let mut candidates = Vec::new();
        for object_id in self.ids_with_prefix(&partial.to_ascii_lowercase())? {
            if self.object_type(&object_id)? == ObjectType::Commit {
                candidates.push(object_id);
            }
        }

        match candidates.len() {
            0 => anyhow::bail!(not_found()),
            1 => Ok(candidates.remove(0)),
            _ => anyhow::bail!(RepositoryError::AmbiguousId(partial.to_string())),
        }
    }

    fn commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut commit_ids = Vec::new();
        for object_id in self.ids_with_prefix("")? {
            if self.object_type(&object_id)? == ObjectType::Commit {
                commit_ids.push(object_id);
            }
        }

        Ok(commit_ids)
    }
}

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    pending: MemoryStore,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            pending: MemoryStore::default(),
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        std::fs::create_dir_all(object_dir).context(format!(
            "Unable to create object directory {}",
            object_dir.display()
        ))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // readers only ever observe complete objects
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Ids of the objects already on disk whose hex form starts with `prefix`
    ///
    /// Prefixes of 2+ characters only look into their fan-out directory.
    fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = Vec::new();

        let directories = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255u8).map(|i| format!("{i:02x}")).collect()
        };

        for dir_name in directories {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let file_name = entry.file_name();
                let full_oid = format!("{}{}", dir_name, file_name.to_string_lossy());

                // leftover temp files fail to parse and are skipped
                if full_oid.starts_with(prefix)
                    && let Ok(oid) = ObjectId::try_parse(full_oid)
                {
                    matches.push(oid);
                }
            }
        }

        Ok(matches)
    }
}

impl ObjectStore for Database {
    fn contains(&self, object_id: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.pending.contains(object_id)? || self.object_path(object_id).is_file())
    }

    fn read_raw(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        if self.pending.contains(object_id)? {
            return self.pending.read_raw(object_id);
        }

        let object_path = self.object_path(object_id);
        if !object_path.is_file() {
            anyhow::bail!(RepositoryError::NotFound(
                Missing::Object,
                object_id.to_string()
            ));
        }

        self.read_object(object_path)
    }

    fn write_raw(&mut self, object_id: ObjectId, content: Bytes) -> anyhow::Result<()> {
        if self.object_path(&object_id).is_file() {
            return Ok(());
        }

        self.pending.write_raw(object_id, content)
    }

    fn ids_with_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let mut matches = self
            .find_objects_by_prefix(prefix)?
            .into_iter()
            .collect::<BTreeSet<_>>();
        matches.extend(self.pending.ids_with_prefix(prefix)?);

        Ok(matches.into_iter().collect())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        let pending = std::mem::take(&mut self.pending).into_objects();
        let count = pending.len();

        for (object_id, content) in pending {
            let object_path = self.object_path(&object_id);
            if !object_path.is_file() {
                self.write_object(object_path, content)?;
            }
        }

        if count > 0 {
            debug!(count, path = %self.path.display(), "flushed objects");
        }
        Ok(())
    }
}
