use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::status_info::{StatusReport, WorkingFiles};
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let report = self.status_report()?;
        write!(self.writer(), "{report}")?;

        Ok(())
    }

    pub fn status_report(&self) -> anyhow::Result<StatusReport> {
        let head = self.head_commit()?;

        let mut working = WorkingFiles::new();
        for name in self.workspace().list_files()? {
            let content = self.workspace().read_file(&name)?;
            working.insert(name, Blob::new(content).object_id()?);
        }

        Ok(StatusReport::inspect(
            self.refs(),
            self.index(),
            head.tracked(),
            &working,
        ))
    }
}
