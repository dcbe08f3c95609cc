//! Tessera - interrelated class and sequence diagram models.
//!
//! Tessera maintains class diagrams (classes, inheritance, relationships) and
//! keeps the sequence diagrams that depend on them informed about structural
//! edits:
//!
//! - Every class box carries four anchors that are recomputed whenever its
//!   geometry changes ([`class::ClassEntity`]).
//! - The override resolver walks a single inheritance edge to find the
//!   methods a subclass redeclares ([`inheritance`]).
//! - Rebinding a relationship endpoint publishes an event to every dependent
//!   sequence diagram, which re-evaluates all of its messages
//!   ([`consistency`]).
//!
//! # Example
//!
//! ```
//! use tessera::{
//!     ClassDiagram,
//!     class::ClassEntity,
//!     geometry::{AnchorType, Point, Size},
//! };
//!
//! let mut diagram = ClassDiagram::new();
//! let dog = diagram.add_class(ClassEntity::new("Dog"));
//!
//! let class = diagram.class_mut(dog).expect("just added");
//! class.set_position(Point::new(50, 50));
//! class.set_size(Size::new(40, 20));
//!
//! assert_eq!(diagram.class_at(0).anchor(AnchorType::Down), Point::new(70, 70));
//! ```

pub mod config;
pub mod consistency;
pub mod inheritance;

mod diagram;
mod error;

pub use tessera_core::{class, geometry, identifier, member, relationship};

pub use diagram::{ClassDiagram, DiagramError};
pub use error::TesseraError;
