//! Plain-text inspection report of a class diagram.
//!
//! The report lists every class with its positional index, anchors and
//! override resolution, followed by every relationship with the positional
//! indices of its endpoints and its kind code:
//!
//! ```text
//! class 0: Animal
//!   anchors: up (20, 0), right (40, 10), down (20, 20), left (0, 10)
//!   overrides: no parent
//! class 1: Dog
//!   parent: 0
//!   anchors: up (70, 50), right (90, 60), down (70, 70), left (50, 60)
//!   overrides: +speak(): void
//! relationship 0: 1 (up) -> 0 (down), kind 5 (inheritance)
//! ```

use std::fmt;

use tessera::{
    ClassDiagram, DiagramError,
    geometry::{AnchorType, Point},
    member::Member,
    relationship::RelationshipKind,
};

/// Report row for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRow {
    pub index: usize,
    pub name: String,
    pub interface: bool,
    pub parent: Option<usize>,
    pub anchors: Vec<(AnchorType, Point)>,
    /// `None` when the class has no (resolvable) parent.
    pub overrides: Option<Vec<Member>>,
}

/// Report row for one relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRow {
    pub index: usize,
    pub from: Option<usize>,
    pub from_anchor: AnchorType,
    pub to: Option<usize>,
    pub to_anchor: AnchorType,
    pub kind: RelationshipKind,
    pub cardinalities: (String, String),
}

/// Snapshot of a diagram, rendered through [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub classes: Vec<ClassRow>,
    pub relationships: Vec<RelationshipRow>,
}

impl Report {
    /// Collects the report rows for `diagram`.
    ///
    /// # Errors
    ///
    /// Propagates [`DiagramError`] from the override resolver.
    pub fn from_diagram(diagram: &ClassDiagram) -> Result<Self, DiagramError> {
        let classes = diagram
            .classes()
            .enumerate()
            .map(|(index, (id, class))| {
                Ok(ClassRow {
                    index,
                    name: class.name().resolve(),
                    interface: class.is_interface(),
                    parent: diagram.parent_index_of(id),
                    anchors: class.anchors().iter().collect(),
                    overrides: diagram.overridden_methods(id)?,
                })
            })
            .collect::<Result<Vec<_>, DiagramError>>()?;

        let relationships = diagram
            .relationships()
            .enumerate()
            .map(|(index, (_, relationship))| RelationshipRow {
                index,
                from: diagram.index_of(relationship.from()),
                from_anchor: relationship.from_anchor(),
                to: diagram.index_of(relationship.to()),
                to_anchor: relationship.to_anchor(),
                kind: relationship.kind(),
                cardinalities: (
                    relationship.from_cardinality().to_string(),
                    relationship.to_cardinality().to_string(),
                ),
            })
            .collect();

        Ok(Self {
            classes,
            relationships,
        })
    }
}

/// Writes an optional index, `-` when it does not resolve.
fn write_index(f: &mut fmt::Formatter<'_>, index: Option<usize>) -> fmt::Result {
    match index {
        Some(index) => write!(f, "{index}"),
        None => f.write_str("-"),
    }
}

impl fmt::Display for ClassRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}: {}", self.index, self.name)?;
        if self.interface {
            f.write_str(" <<interface>>")?;
        }
        writeln!(f)?;

        if let Some(parent) = self.parent {
            writeln!(f, "  parent: {parent}")?;
        }

        f.write_str("  anchors: ")?;
        for (i, (anchor, point)) in self.anchors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{anchor} {point}")?;
        }
        writeln!(f)?;

        f.write_str("  overrides: ")?;
        match &self.overrides {
            None => f.write_str("no parent")?,
            Some(methods) if methods.is_empty() => f.write_str("none")?,
            Some(methods) => {
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{method}")?;
                }
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for RelationshipRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "relationship {}: ", self.index)?;
        write_index(f, self.from)?;
        write!(f, " ({}) -> ", self.from_anchor)?;
        write_index(f, self.to)?;
        write!(
            f,
            " ({}), kind {} ({})",
            self.to_anchor,
            self.kind.code(),
            self.kind
        )?;

        let (from, to) = &self.cardinalities;
        if !from.is_empty() || !to.is_empty() {
            write!(f, ", cardinality \"{from}\" -> \"{to}\"")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.classes {
            write!(f, "{class}")?;
        }
        for relationship in &self.relationships {
            write!(f, "{relationship}")?;
        }
        Ok(())
    }
}
