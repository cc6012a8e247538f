use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;

impl Repository {
    /// Stage the working copy of `file`
    ///
    /// Content identical to the head's version leaves nothing staged for the
    /// file, which also cancels a staged removal.
    pub fn add(&mut self, file: &str) -> anyhow::Result<()> {
        let name = self.workspace().normalize(file)?;
        let content = self.workspace().read_file(&name)?;

        let blob_id = Blob::new(content.clone()).object_id()?;
        if self.head_commit()?.blob_for(&name) == Some(&blob_id) {
            self.index_mut().unstage(&name);
            return Ok(());
        }

        let blob_id = self.database_mut().put_blob(content)?;
        self.index_mut().stage_addition(name, blob_id);

        Ok(())
    }
}
