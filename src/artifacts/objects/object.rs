use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::{BufRead, Write};

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Rebuild the value from its body; the `<type> <size>\0` header has
    /// already been consumed from `reader`.
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        Ok(ObjectId::digest(&self.serialize()?))
    }
}

/// Prefix `body` with the `<type> <len>\0` header
pub fn frame(object_type: ObjectType, body: &[u8]) -> Result<Bytes> {
    let mut framed = Vec::with_capacity(body.len() + 16);
    write!(framed, "{} {}\0", object_type.as_str(), body.len())?;
    framed.write_all(body)?;

    Ok(Bytes::from(framed))
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Commit(Box<Commit>),
}
