use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::relative::Match;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RecordType {
    Txt,
    Other(String),
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Txt => f.write_str("TXT"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("TXT") {
            Self::Txt
        } else {
            Self::Other(s.to_ascii_uppercase())
        }
    }
}

impl From<RecordType> for String {
    fn from(kind: RecordType) -> Self {
        kind.to_string()
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

/// A DNS record as seen by a [`RecordStore`](crate::dns::RecordStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier, if the provider has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Relative to the zone, or absolute; see [`Match::names`].
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecordType,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl Record {
    #[must_use]
    pub fn txt(name: &str, value: &str, ttl: Option<u32>) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            kind: RecordType::Txt,
            value: value.to_string(),
            ttl,
        }
    }

    /// A TXT record at `m`'s target, regardless of value.
    #[must_use]
    pub fn is_challenge_slot(&self, m: &Match) -> bool {
        self.kind == RecordType::Txt && m.names(&self.name)
    }

    /// The challenge record for `m` carrying exactly `value`.
    ///
    /// Values compare byte-for-byte, so any quoting the provider
    /// applies has to be present in `value` too.
    #[must_use]
    pub fn is_challenge(&self, m: &Match, value: &str) -> bool {
        self.is_challenge_slot(m) && self.value == value
    }
}
