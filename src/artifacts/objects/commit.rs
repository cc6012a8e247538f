//! Commit object
//!
//! A commit is an immutable snapshot: the full filename → blob mapping, up to
//! two parents, a timestamp and a message. The root commit is the same in every
//! repository so that independent repositories share an ancestor.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <first-parent-sha>          (absent on the root commit)
//! merge <second-parent-sha>          (merge commits only)
//! timestamp <unix-seconds> <+hhmm>
//! file <blob-sha> <name>             (one per tracked file, sorted by name)
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Filename → blob id
pub type TrackedFiles = BTreeMap<String, ObjectId>;

/// Parent links only, enough for graph walks
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub oid: ObjectId,
    pub parents: Vec<ObjectId>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    tracked: TrackedFiles,
    first_parent: Option<ObjectId>,
    second_parent: Option<ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        tracked: TrackedFiles,
        first_parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
    ) -> Self {
        Commit {
            message,
            timestamp,
            tracked,
            first_parent,
            second_parent,
        }
    }

    /// The parentless commit every repository starts from
    pub fn root() -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH.fixed_offset();
        Commit::new(
            ROOT_COMMIT_MESSAGE.to_string(),
            epoch,
            TrackedFiles::new(),
            None,
            None,
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Timestamp as shown by `log`, e.g. `Thu Jan 1 00:00:00 1970 +0000`
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn tracked(&self) -> &TrackedFiles {
        &self.tracked
    }

    pub fn blob_for(&self, name: &str) -> Option<&ObjectId> {
        self.tracked.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.tracked.contains_key(name)
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.first_parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.first_parent.iter().chain(self.second_parent.iter())
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents().cloned().collect(),
        }
    }

    fn body(&self) -> String {
        let mut lines = vec![];

        if let Some(parent) = &self.first_parent {
            lines.push(format!("parent {parent}"));
        }
        if let Some(parent) = &self.second_parent {
            lines.push(format!("merge {parent}"));
        }
        lines.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (name, blob_id) in &self.tracked {
            lines.push(format!("file {blob_id} {name}"));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }
}

fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, offset) = value
        .split_once(' ')
        .context("Invalid commit object: malformed timestamp")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid commit object: malformed timestamp seconds")?;

    DateTime::from_timestamp(seconds, 0)
        .zip(parse_offset(offset))
        .map(|(utc, offset)| utc.with_timezone(&offset))
        .context("Invalid commit object: malformed timestamp")
}

/// `+hhmm` / `-hhmm`
fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let (sign, digits) = match offset.split_at_checked(1)? {
        ("+", digits) => (1, digits),
        ("-", digits) => (-1, digits),
        _ => return None,
    };
    if digits.len() != 4 {
        return None;
    }
    let hours = digits[..2].parse::<i32>().ok()?;
    let minutes = digits[2..].parse::<i32>().ok()?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        // one `file` header per line
        if let Some(name) = self.tracked.keys().find(|name| name.contains('\n')) {
            anyhow::bail!("Invalid commit object: file name contains a newline: {name:?}");
        }

        frame(self.object_type(), self.body().as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (headers, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut first_parent = None;
        let mut second_parent = None;
        let mut timestamp = None;
        let mut tracked = TrackedFiles::new();

        for line in headers.split('\n') {
            let (key, value) = line
                .split_once(' ')
                .context(format!("Invalid commit object: malformed line '{line}'"))?;

            match key {
                "parent" => first_parent = Some(ObjectId::try_parse(value.to_string())?),
                "merge" => second_parent = Some(ObjectId::try_parse(value.to_string())?),
                "timestamp" => timestamp = Some(parse_timestamp(value)?),
                "file" => {
                    let (blob_id, name) = value
                        .split_once(' ')
                        .context(format!("Invalid commit object: malformed file '{value}'"))?;
                    tracked.insert(name.to_string(), ObjectId::try_parse(blob_id.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown header '{key}'"),
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp")?;
        Ok(Self::new(
            message.to_string(),
            timestamp,
            tracked,
            first_parent,
            second_parent,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.body()
    }
}
