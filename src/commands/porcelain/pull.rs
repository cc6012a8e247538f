use crate::areas::repository::Repository;
use crate::commands::porcelain::merge::MergeOutcome;

impl Repository {
    /// Fetch `branch` from `remote_name` and merge its tracking branch
    pub fn pull(&mut self, remote_name: &str, branch: &str) -> anyhow::Result<MergeOutcome> {
        let tracking = self.fetch(remote_name, branch)?;
        self.merge(tracking.as_ref())
    }
}
