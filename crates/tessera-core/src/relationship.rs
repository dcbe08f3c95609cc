//! Structural edges between classes.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::{geometry::AnchorType, identifier::ClassId};

/// The kind of a relationship, with a stable numeric code for persistence
/// and rendering collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    #[default]
    Association,
    Aggregation,
    Composition,
    Dependency,
    Realization,
    Inheritance,
}

impl RelationshipKind {
    /// Numeric code of the kind, `0..=5` in declaration order.
    pub fn code(self) -> u8 {
        match self {
            RelationshipKind::Association => 0,
            RelationshipKind::Aggregation => 1,
            RelationshipKind::Composition => 2,
            RelationshipKind::Dependency => 3,
            RelationshipKind::Realization => 4,
            RelationshipKind::Inheritance => 5,
        }
    }
}

/// Error returned when converting an unknown numeric kind code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid relationship kind code {0}, expected 0..=5")]
pub struct InvalidKindCode(pub u8);

impl TryFrom<u8> for RelationshipKind {
    type Error = InvalidKindCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RelationshipKind::Association),
            1 => Ok(RelationshipKind::Aggregation),
            2 => Ok(RelationshipKind::Composition),
            3 => Ok(RelationshipKind::Dependency),
            4 => Ok(RelationshipKind::Realization),
            5 => Ok(RelationshipKind::Inheritance),
            _ => Err(InvalidKindCode(code)),
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationshipKind::Association => "association",
            RelationshipKind::Aggregation => "aggregation",
            RelationshipKind::Composition => "composition",
            RelationshipKind::Dependency => "dependency",
            RelationshipKind::Realization => "realization",
            RelationshipKind::Inheritance => "inheritance",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown relationship kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown relationship kind `{0}`")]
pub struct ParseKindError(String);

impl FromStr for RelationshipKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "association" => Ok(RelationshipKind::Association),
            "aggregation" => Ok(RelationshipKind::Aggregation),
            "composition" => Ok(RelationshipKind::Composition),
            "dependency" => Ok(RelationshipKind::Dependency),
            "realization" => Ok(RelationshipKind::Realization),
            "inheritance" => Ok(RelationshipKind::Inheritance),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Selects one end of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipEnd {
    /// The end the relationship originates from.
    Source,
    /// The end the relationship terminates at.
    Target,
}

impl fmt::Display for RelationshipEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipEnd::Source => f.write_str("source"),
            RelationshipEnd::Target => f.write_str("target"),
        }
    }
}

/// A typed edge between two classes, attached at specific anchors and
/// labelled with a cardinality at each end.
///
/// Endpoints are class handles. Rebinding an endpoint is deliberately not
/// offered here: it has to go through the owning diagram so dependent
/// sequence diagrams are notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    from: ClassId,
    from_anchor: AnchorType,
    to: ClassId,
    to_anchor: AnchorType,
    from_cardinality: String,
    to_cardinality: String,
    kind: RelationshipKind,
}

impl Relationship {
    /// Creates a relationship with empty cardinality labels.
    pub fn new(
        from: ClassId,
        from_anchor: AnchorType,
        to: ClassId,
        to_anchor: AnchorType,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            from,
            from_anchor,
            to,
            to_anchor,
            from_cardinality: String::new(),
            to_cardinality: String::new(),
            kind,
        }
    }

    /// Sets both cardinality labels (builder style).
    pub fn with_cardinalities(
        mut self,
        from_cardinality: impl Into<String>,
        to_cardinality: impl Into<String>,
    ) -> Self {
        self.from_cardinality = from_cardinality.into();
        self.to_cardinality = to_cardinality.into();
        self
    }

    pub fn from(&self) -> ClassId {
        self.from
    }

    pub fn to(&self) -> ClassId {
        self.to
    }

    /// Class handle at the given end.
    pub fn endpoint(&self, end: RelationshipEnd) -> ClassId {
        match end {
            RelationshipEnd::Source => self.from,
            RelationshipEnd::Target => self.to,
        }
    }

    pub fn from_anchor(&self) -> AnchorType {
        self.from_anchor
    }

    pub fn to_anchor(&self) -> AnchorType {
        self.to_anchor
    }

    pub fn from_cardinality(&self) -> &str {
        &self.from_cardinality
    }

    pub fn to_cardinality(&self) -> &str {
        &self.to_cardinality
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn set_from_anchor(&mut self, anchor: AnchorType) {
        self.from_anchor = anchor;
    }

    pub fn set_to_anchor(&mut self, anchor: AnchorType) {
        self.to_anchor = anchor;
    }

    pub fn set_from_cardinality(&mut self, cardinality: impl Into<String>) {
        self.from_cardinality = cardinality.into();
    }

    pub fn set_to_cardinality(&mut self, cardinality: impl Into<String>) {
        self.to_cardinality = cardinality.into();
    }

    pub fn set_kind(&mut self, kind: RelationshipKind) {
        self.kind = kind;
    }

    /// Replaces the class handle at `end`.
    ///
    /// Hidden from the public API: containers call this and then publish the
    /// change themselves.
    #[doc(hidden)]
    pub fn replace_endpoint(&mut self, end: RelationshipEnd, class: ClassId) {
        match end {
            RelationshipEnd::Source => self.from = class,
            RelationshipEnd::Target => self.to = class,
        }
    }
}
