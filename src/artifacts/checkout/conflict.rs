use crate::artifacts::objects::commit::TrackedFiles;
use std::collections::BTreeSet;

/// True when `ancestor` names a directory that contains `path`
fn is_parent_dir(ancestor: &str, path: &str) -> bool {
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Working files the move from `current` to `target` would clobber
///
/// A file is in the way when `current` does not track it and `target` would
/// write over it, either at the same name or by needing its name as a
/// directory (or the other way round).
pub fn untracked_in_the_way(
    working_files: &BTreeSet<String>,
    current: &TrackedFiles,
    target: &TrackedFiles,
) -> Vec<String> {
    working_files
        .iter()
        .filter(|file| !current.contains_key(*file))
        .filter(|file| {
            target.contains_key(*file)
                || target
                    .keys()
                    .any(|name| is_parent_dir(name, file) || is_parent_dir(file, name))
        })
        .cloned()
        .collect()
}
