//! Identifier and reference types shared by every model
//!
//! Identifiers are MongoDB ObjectIds. Over HTTP and in JSON documents they are
//! 24-character hex strings; the MongoDB store writes them as BSON ObjectIds.

use mongodb::bson::oid::ObjectId;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::error::{Error, Result};

/// Document identifier (an ObjectId rendered as lowercase hex)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(ObjectId);

impl Id {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse an identifier received from a client.
    ///
    /// Anything that is not 24 hex characters is rejected with
    /// [`StorageError::InvalidId`](crate::core::error::StorageError::InvalidId),
    /// the same failure the database raises for a bad cast.
    pub fn parse(value: &str) -> Result<Self> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|_| Error::invalid_id(value))
    }

    /// Hex form of the identifier
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Id {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0.to_hex())
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        ObjectId::parse_str(&value)
            .map(Self)
            .map_err(|_| de::Error::custom(format!("invalid ObjectId \"{}\"", value)))
    }
}

impl From<Id> for serde_json::Value {
    fn from(id: Id) -> Self {
        serde_json::Value::String(id.to_hex())
    }
}

impl From<&Id> for serde_json::Value {
    fn from(id: &Id) -> Self {
        serde_json::Value::String(id.to_hex())
    }
}

/// A weak reference from one document to another.
///
/// Stored documents only ever hold [`Reference::Id`]. The join step in
/// [`crate::storage::resolve`] swaps it for the referenced record, or for
/// [`Reference::Dangling`] when the target no longer exists. Serialized, an
/// unresolved reference is the bare id, a resolved one is the full record and
/// a dangling one is `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference<T> {
    /// Identifier only, as stored
    Id(Id),
    /// The referenced record
    Resolved(Box<T>),
    /// The referenced record was not found
    Dangling(Id),
}

impl<T> Reference<T> {
    /// The resolved record, if the join found one
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Reference::Resolved(record) => Some(record),
            _ => None,
        }
    }

    /// Mutable access to the resolved record, used by nested joins
    pub fn resolved_mut(&mut self) -> Option<&mut T> {
        match self {
            Reference::Resolved(record) => Some(record),
            _ => None,
        }
    }

    /// Whether the join has run for this reference
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Reference::Id(_))
    }
}

impl<T> From<Id> for Reference<T> {
    fn from(id: Id) -> Self {
        Reference::Id(id)
    }
}

impl<T: Serialize> Serialize for Reference<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Reference::Id(id) => id.serialize(serializer),
            Reference::Resolved(record) => record.serialize(serializer),
            Reference::Dangling(_) => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Reference<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Id(Id),
            Resolved(Box<T>),
        }

        Ok(match Repr::<T>::deserialize(deserializer)? {
            Repr::Id(id) => Reference::Id(id),
            Repr::Resolved(record) => Reference::Resolved(record),
        })
    }
}
