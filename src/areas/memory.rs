//! In-memory object store
//!
//! An append-only arena keyed by object id. It doubles as the write buffer of
//! the on-disk `Database`.

use crate::areas::database::ObjectStore;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Missing, RepositoryError};
use bytes::Bytes;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    objects: BTreeMap<ObjectId, Bytes>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn into_objects(self) -> BTreeMap<ObjectId, Bytes> {
        self.objects
    }
}

impl ObjectStore for MemoryStore {
    fn contains(&self, object_id: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.objects.contains_key(object_id))
    }

    fn read_raw(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        match self.objects.get(object_id) {
            Some(content) => Ok(content.clone()),
            None => anyhow::bail!(RepositoryError::NotFound(
                Missing::Object,
                object_id.to_string()
            )),
        }
    }

    fn write_raw(&mut self, object_id: ObjectId, content: Bytes) -> anyhow::Result<()> {
        self.objects.entry(object_id).or_insert(content);
        Ok(())
    }

    fn ids_with_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self
            .objects
            .keys()
            .filter(|object_id| object_id.as_ref().starts_with(prefix))
            .cloned()
            .collect())
    }
}
