//! Identifiers for class-diagram elements.
//!
//! Two kinds of identity live here:
//!
//! - [`Id`] is a string-interned *name*. Class names, member names and member
//!   type names are all `Id`s, which keeps [`Member`](crate::member::Member)
//!   a small `Copy` value whose equality is a couple of integer compares.
//! - [`ClassId`] and [`RelationshipId`] are opaque *handles* handed out by a
//!   diagram container. A handle is stable for the lifetime of the entity it
//!   names: removing other entities never changes it. Positional indices are
//!   derived from handles on demand and are never stored. Fresh handles are
//!   unique within the process, so a handle minted by one diagram never
//!   resolves in another.

use std::{
    fmt,
    sync::{
        Mutex, OnceLock, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Process-wide interner backing every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(0);
static NEXT_RELATIONSHIP_ID: AtomicU64 = AtomicU64::new(0);

/// Runs `f` with exclusive access to the interner.
///
/// The interner is append-only, so a poisoned lock is recovered.
fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut interner)
}

/// Takes the next value of a handle counter, refusing to wrap around.
fn next_handle(counter: &AtomicU64) -> u64 {
    counter
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| next.checked_add(1))
        .unwrap_or_else(|_| panic!("handle space exhausted"))
}

/// Interned name of a class, member or type.
///
/// # Examples
///
/// ```
/// use tessera_core::identifier::Id;
///
/// let speak = Id::new("speak");
/// assert_eq!(speak, Id::new("speak"));
/// assert_eq!(speak, "speak");
/// assert_eq!(speak.to_string(), "speak");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns the owned string this identifier was created from.
    pub fn resolve(self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .map(str::to_owned)
                .unwrap_or_default()
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Stable handle of a class entity inside a diagram container.
///
/// Handles are allocated by the container and compared by identity: two
/// classes with identical content still carry different handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    /// Mints a handle that has never been returned before in this process.
    ///
    /// # Panics
    ///
    /// Panics once the 64-bit handle space is exhausted.
    pub fn fresh() -> Self {
        Self(next_handle(&NEXT_CLASS_ID))
    }

    /// Wraps a raw handle value, e.g. one read back from a log.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Stable handle of a relationship inside a diagram container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationshipId(u64);

impl RelationshipId {
    /// Mints a handle that has never been returned before in this process.
    ///
    /// # Panics
    ///
    /// Panics once the 64-bit handle space is exhausted.
    pub fn fresh() -> Self {
        Self(next_handle(&NEXT_RELATIONSHIP_ID))
    }

    /// Wraps a raw handle value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relationship#{}", self.0)
    }
}
