//! Fields and methods declared on a class.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::Deserialize;
use thiserror::Error;

use crate::identifier::Id;

/// Access level of a member, with UML notation symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
    Package,
}

impl Visibility {
    /// Returns the UML symbol for this visibility (`+`, `#`, `-`, `~`).
    pub fn symbol(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Protected => '#',
            Visibility::Private => '-',
            Visibility::Package => '~',
        }
    }
}

/// Error returned when parsing an unknown visibility name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown visibility `{0}`, expected one of: public, protected, private, package")]
pub struct ParseVisibilityError(String);

impl FromStr for Visibility {
    type Err = ParseVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" | "+" => Ok(Visibility::Public),
            "protected" | "#" => Ok(Visibility::Protected),
            "private" | "-" => Ok(Visibility::Private),
            "package" | "~" => Ok(Visibility::Package),
            _ => Err(ParseVisibilityError(s.to_string())),
        }
    }
}

/// Whether a member is a field or a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Method,
}

/// A field or method entry of a class.
///
/// Members are immutable values. Two members are the same member when their
/// name, kind and data type match; visibility is a modifier and does not take
/// part in equality, so a subclass that redeclares an inherited method with a
/// different access level still redeclares *that* method.
///
/// # Examples
///
/// ```
/// use tessera_core::member::{Member, Visibility};
///
/// let parent = Member::method("speak", Visibility::Protected).with_data_type("void");
/// let child = Member::method("speak", Visibility::Public).with_data_type("void");
/// assert_eq!(parent, child);
/// assert_eq!(child.to_string(), "+speak(): void");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Member {
    name: Id,
    visibility: Visibility,
    kind: MemberKind,
    data_type: Option<Id>,
}

impl Member {
    /// Creates a member without a data type.
    pub fn new(name: impl Into<Id>, visibility: Visibility, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            visibility,
            kind,
            data_type: None,
        }
    }

    /// Creates a field member.
    pub fn field(name: impl Into<Id>, visibility: Visibility) -> Self {
        Self::new(name, visibility, MemberKind::Field)
    }

    /// Creates a method member.
    pub fn method(name: impl Into<Id>, visibility: Visibility) -> Self {
        Self::new(name, visibility, MemberKind::Method)
    }

    /// Returns a copy of this member with the given data type.
    pub fn with_data_type(mut self, data_type: impl Into<Id>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Field type or method return type, if declared.
    pub fn data_type(&self) -> Option<Id> {
        self.data_type
    }

    /// Returns true unless the member is private.
    pub fn is_inheritable(&self) -> bool {
        self.visibility != Visibility::Private
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind && self.data_type == other.data_type
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.kind.hash(state);
        self.data_type.hash(state);
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.visibility.symbol(), self.name)?;
        if self.kind == MemberKind::Method {
            f.write_str("()")?;
        }
        if let Some(data_type) = self.data_type {
            write!(f, ": {data_type}")?;
        }
        Ok(())
    }
}
