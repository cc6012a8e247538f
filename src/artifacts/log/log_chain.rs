use crate::areas::database::ObjectStore;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// First-parent history starting at `start`, newest first
#[derive(Clone, new)]
pub struct LogChain<'r> {
    store: &'r dyn ObjectStore,
    start: ObjectId,
}

impl<'r> IntoIterator for LogChain<'r> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = LogChainIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        LogChainIter {
            store: self.store,
            next_commit_oid: Some(self.start),
        }
    }
}

impl LogChain<'_> {
    /// True when `target` appears on the chain
    pub fn contains(&self, target: &ObjectId) -> anyhow::Result<bool> {
        for entry in self.clone() {
            let (commit_oid, _) = entry?;
            if &commit_oid == target {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[derive(Clone)]
pub struct LogChainIter<'r> {
    store: &'r dyn ObjectStore,
    next_commit_oid: Option<ObjectId>,
}

impl Iterator for LogChainIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_commit_oid.take()?;

        match self.store.get_commit(&commit_oid) {
            Ok(commit) => {
                self.next_commit_oid = commit.first_parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            // a broken chain ends the walk after reporting the failure
            Err(error) => Some(Err(error)),
        }
    }
}
