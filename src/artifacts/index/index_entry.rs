//! Staged change record
//!
//! One entry per staged file name. Additions carry the blob id of the staged
//! content; removals carry an all-zero id on disk.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::io::{BufRead, Cursor, Write};

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Kind byte + raw id + at least one name byte and its terminator, padded
pub const ENTRY_MIN_SIZE: usize = 24;

const ADDITION: u8 = 1;
const REMOVAL: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    Addition(ObjectId),
    Removal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    pub change: StagedChange,
}

impl IndexEntry {
    pub fn addition(name: String, blob_id: ObjectId) -> Self {
        IndexEntry {
            name,
            change: StagedChange::Addition(blob_id),
        }
    }

    pub fn removal(name: String) -> Self {
        IndexEntry {
            name,
            change: StagedChange::Removal,
        }
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut entry_bytes = Vec::with_capacity(ENTRY_MIN_SIZE + self.name.len());

        match &self.change {
            StagedChange::Addition(blob_id) => {
                entry_bytes.push(ADDITION);
                blob_id.write_h40_to(&mut entry_bytes)?;
            }
            StagedChange::Removal => {
                entry_bytes.push(REMOVAL);
                entry_bytes.write_all(&[0u8; OBJECT_ID_LENGTH / 2])?;
            }
        }
        entry_bytes.write_all(self.name.as_bytes())?;

        // at least one NUL terminates the name, the rest pads to the block size
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let bytes = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        if bytes.len() < ENTRY_MIN_SIZE {
            return Err(anyhow::anyhow!("Invalid index entry size"));
        }

        let name_start = 1 + OBJECT_ID_LENGTH / 2;
        let name_end = bytes[name_start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| anyhow::anyhow!("Missing null terminator in entry name"))?;
        let name = std::str::from_utf8(&bytes[name_start..name_start + name_end])
            .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in entry name"))?
            .to_string();

        match bytes[0] {
            ADDITION => {
                let blob_id = ObjectId::read_h40_from(&mut Cursor::new(&bytes[1..name_start]))?;
                Ok(IndexEntry::addition(name, blob_id))
            }
            REMOVAL => Ok(IndexEntry::removal(name)),
            kind => Err(anyhow::anyhow!("Unknown index entry kind: {kind}")),
        }
    }
}
