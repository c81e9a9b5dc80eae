//! Space entities as exposed by the space management API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::user::UserId;

/// Remote space identifier.
///
/// The API returns numeric ids, but the value is treated as opaque and
/// accepted from either a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpaceId(String);

impl SpaceId {
    /// Creates an identifier from user input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` if the input is blank, a
    /// dot segment, or contains a path separator.
    pub fn new(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() || matches!(trimmed, "." | "..") || trimmed.contains(['/', '\\']) {
            return Err(DomainError::InvalidIdentifier(id));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as it appears in URLs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the file name used when downloading this space's export.
    #[must_use]
    pub fn export_file_name(&self) -> String {
        format!("space-export-{}.json", self.0)
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SpaceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for SpaceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<u64>() {
            Ok(number) => serializer.serialize_u64(number),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for SpaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        let raw = match RawId::deserialize(deserializer)? {
            RawId::Number(number) => number.to_string(),
            RawId::Text(text) => text,
        };
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A space as it appears in the paginated space listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSummary {
    /// Remote identifier.
    pub id: SpaceId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Response body of a successful space creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSpace {
    /// Identifier assigned by the server.
    pub id: SpaceId,
    /// Name of the new space.
    #[serde(default)]
    pub name: String,
}

impl fmt::Display for CreatedSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.name, self.id)
    }
}

/// Full JSON document of a space, round-tripped verbatim.
///
/// Key order is preserved so that a pretty-printed export matches what
/// the server sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceDocument(Value);

impl SpaceDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the text is not valid JSON.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self)
    }

    /// Pretty-prints the document with a two-space indent and no trailing newline.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        // Serializing a `Value` cannot fail.
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }

    /// Serializes the document compactly for a request body.
    #[must_use]
    pub fn to_compact_string(&self) -> String {
        self.0.to_string()
    }
}

/// Role granted to a space member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpaceRole {
    /// Full administrative access.
    #[default]
    Admin,
}

impl SpaceRole {
    /// Returns the role as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

/// Body of `POST /spaces/<id>/members/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAssignment {
    /// User being added.
    pub member: UserId,
    /// Role granted.
    pub role: SpaceRole,
}

impl MemberAssignment {
    /// Grants `admin` to the given user.
    #[must_use]
    pub const fn admin(member: UserId) -> Self {
        Self {
            member,
            role: SpaceRole::Admin,
        }
    }
}
