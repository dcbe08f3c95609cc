//! Tessera Core Types and Definitions
//!
//! This crate provides the leaf model types for Tessera class diagrams. It
//! includes:
//!
//! - **Identifiers**: Interned names ([`identifier::Id`]) and stable entity
//!   handles ([`identifier::ClassId`], [`identifier::RelationshipId`])
//! - **Geometry**: Integer points and sizes plus the anchor engine
//!   ([`geometry`] module)
//! - **Members**: Fields and methods with value-based equality ([`member`] module)
//! - **Classes**: Class entities with eagerly maintained anchors ([`class`] module)
//! - **Relationships**: Typed edges between classes ([`relationship`] module)
//!
//! The diagram container, inheritance resolution and consistency tracking
//! live in the `tessera` crate.

pub mod class;
pub mod geometry;
pub mod identifier;
pub mod member;
pub mod relationship;
