//! Archive groups and their keys.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::Candidate;

/// Discriminator naming one archive group.
///
/// Either a canonical `"YYYY-MM"` month (date mode) or a user pattern with
/// its wildcard characters stripped (pattern mode). The key doubles as the
/// archive base name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey(CompactString);

impl GroupKey {
    /// Key for a calendar month.
    pub fn month(year: i32, month: u32) -> Self {
        Self(CompactString::from(format!("{year:04}-{month:02}")))
    }

    /// Key derived from a wildcard pattern: `*` and `?` are stripped,
    /// leaving the archive base name.
    pub fn from_pattern(pattern: &str) -> Self {
        let base: String = pattern.chars().filter(|c| !matches!(c, '*' | '?')).collect();
        Self(CompactString::from(base))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        Self(CompactString::from(s))
    }
}

/// A set of source files destined for one archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Group key, also the archive base name.
    pub key: GroupKey,
    /// Members in discovery order. The archive is written in this order.
    pub members: Vec<Candidate>,
}

impl Group {
    /// Create an empty group.
    pub fn new(key: GroupKey) -> Self {
        Self {
            key,
            members: Vec::new(),
        }
    }

    /// A group is eligible for archival when it has at least one member.
    pub fn is_eligible(&self) -> bool {
        !self.members.is_empty()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Total size of all members in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.members.iter().map(|c| c.size).sum()
    }
}
