//! Broad classification of column types.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataKind {
    Boolean,
    Numeric,
    #[default]
    String,
    Datetime,
    Binary,
    Content,
    Structure,
    Document,
    Array,
    Object,
    Reference,
    Rowid,
    Any,
    Unknown,
}

impl DataKind {
    /// Every kind, in declaration order
    pub const ALL: [DataKind; 14] = [
        DataKind::Boolean,
        DataKind::Numeric,
        DataKind::String,
        DataKind::Datetime,
        DataKind::Binary,
        DataKind::Content,
        DataKind::Structure,
        DataKind::Document,
        DataKind::Array,
        DataKind::Object,
        DataKind::Reference,
        DataKind::Rowid,
        DataKind::Any,
        DataKind::Unknown,
    ];

    /// Kinds a user may pick for a column; `UNKNOWN` is never offered
    pub fn selectable() -> impl Iterator<Item = DataKind> {
        Self::ALL.into_iter().filter(|k| *k != DataKind::Unknown)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataKind::Boolean => "BOOLEAN",
            DataKind::Numeric => "NUMERIC",
            DataKind::String => "STRING",
            DataKind::Datetime => "DATETIME",
            DataKind::Binary => "BINARY",
            DataKind::Content => "CONTENT",
            DataKind::Structure => "STRUCTURE",
            DataKind::Document => "DOCUMENT",
            DataKind::Array => "ARRAY",
            DataKind::Object => "OBJECT",
            DataKind::Reference => "REFERENCE",
            DataKind::Rowid => "ROWID",
            DataKind::Any => "ANY",
            DataKind::Unknown => "UNKNOWN",
        }
    }

    /// Parse `text`, falling back to `default` when it names no kind
    pub fn parse_or(text: &str, default: DataKind) -> DataKind {
        text.parse().unwrap_or(default)
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match Self::ALL.iter().find(|k| k.name().eq_ignore_ascii_case(s)) {
            Some(kind) => Ok(*kind),
            None => bail!("Unknown data kind: {}", s),
        }
    }
}
