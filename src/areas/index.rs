//! Staging index
//!
//! Holds the changes queued for the next commit: file names staged for
//! addition (with the blob id of the staged content) and file names staged for
//! removal. A name is never in both sets.
//!
//! ## Index File
//!
//! Persisted at `.twig/index` with a header, padded entries and a trailing
//! SHA-1 checksum (see `artifacts::index`). Loading happens under a shared
//! lock, writing under an exclusive one.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{
    ENTRY_BLOCK, ENTRY_MIN_SIZE, IndexEntry, StagedChange,
};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.twig/index`)
    path: Box<Path>,
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeSet<String>,
    /// Set once the in-memory state diverges from the file
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn staged_addition(&self, name: &str) -> Option<&ObjectId> {
        self.additions.get(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.removals.contains(name)
    }

    pub fn stage_addition(&mut self, name: String, blob_id: ObjectId) {
        self.removals.remove(&name);
        self.additions.insert(name, blob_id);
        self.changed = true;
    }

    pub fn stage_removal(&mut self, name: String) {
        self.additions.remove(&name);
        self.removals.insert(name);
        self.changed = true;
    }

    /// Drop any staged change for `name`; true when something was staged
    pub fn unstage(&mut self, name: &str) -> bool {
        let unstaged = self.additions.remove(name).is_some() | self.removals.remove(name);
        self.changed |= unstaged;
        unstaged
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.changed = true;
        }
        self.additions.clear();
        self.removals.clear();
    }

    fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        let additions = self
            .additions
            .iter()
            .map(|(name, blob_id)| IndexEntry::addition(name.clone(), blob_id.clone()));
        let removals = self
            .removals
            .iter()
            .map(|name| IndexEntry::removal(name.clone()));

        additions.chain(removals)
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions.clear();
        self.removals.clear();
        self.changed = false;

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let entries_count = Self::parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;

        reader.verify()
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    fn parse_entries(&mut self, entries_count: u32, reader: &mut Checksum) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let mut entry_bytes = reader.read(ENTRY_MIN_SIZE)?.to_vec();

            // names longer than the minimum entry spill into further blocks
            while entry_bytes[entry_bytes.len() - 1] != 0 {
                entry_bytes.extend_from_slice(&reader.read(ENTRY_BLOCK)?);
            }

            let entry = IndexEntry::deserialize(std::io::Cursor::new(Bytes::from(entry_bytes)))?;
            match entry.change {
                StagedChange::Addition(blob_id) => {
                    self.additions.insert(entry.name, blob_id);
                }
                StagedChange::Removal => {
                    self.removals.insert(entry.name);
                }
            }
        }

        Ok(())
    }

    /// Persist the index if it changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let entries_count = (self.additions.len() + self.removals.len()) as u32;
        writer.write(&IndexHeader::with_entries(entries_count).serialize()?)?;

        for entry in self.entries() {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }
}
