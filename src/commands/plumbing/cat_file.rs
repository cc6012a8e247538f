use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print a blob's bytes or a commit's canonical body
    ///
    /// Full ids reach any object; abbreviated ids resolve among commits only.
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<()> {
        let object_id = match ObjectId::try_parse(object_id.to_string()) {
            Ok(object_id) => object_id,
            Err(_) => self.database().resolve_prefix(object_id)?,
        };

        match self.database().parse_object(&object_id)? {
            ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
            ObjectBox::Commit(commit) => write!(self.writer(), "{}", commit.display())?,
        }

        Ok(())
    }
}
