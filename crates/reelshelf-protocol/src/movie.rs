//! Movie record types exchanged with the collection service.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Record identifier.
///
/// The service may hand back numeric or string ids, so both shapes are kept
/// and written back the way they were read. Equality uses the textual form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    /// Numeric id, e.g. a millisecond timestamp.
    Number(u64),
    /// String id assigned by the service.
    Text(String),
}

impl MovieId {
    /// Textual form used for comparison and URL paths.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            MovieId::Number(value) => Cow::Owned(value.to_string()),
            MovieId::Text(value) => Cow::Borrowed(value.as_str()),
        }
    }
}

impl PartialEq for MovieId {
    fn eq(&self, other: &Self) -> bool {
        self.as_key() == other.as_key()
    }
}

impl Eq for MovieId {}

impl Hash for MovieId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl FromStr for MovieId {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        // Only canonical digits become numbers; "007" must stay distinct from "7".
        Ok(match value.parse::<u64>() {
            Ok(number) if number.to_string() == value => MovieId::Number(number),
            _ => MovieId::Text(value.to_string()),
        })
    }
}

impl From<u64> for MovieId {
    fn from(value: u64) -> Self {
        MovieId::Number(value)
    }
}

impl From<&str> for MovieId {
    fn from(value: &str) -> Self {
        MovieId::Text(value.to_string())
    }
}

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre: String,
    pub year: i32,
}

/// Body of a create request. `id` is omitted when the service assigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre: String,
    pub year: i32,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
