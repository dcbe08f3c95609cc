//! Override resolution along a single inheritance edge.

use log::debug;

use tessera_core::{identifier::ClassId, member::Member};

use crate::diagram::{ClassDiagram, DiagramError};

/// Computes the methods of `class` that override a method of its immediate
/// parent.
///
/// A method of `class` is an override when the parent declares an equal
/// method (same name, kind and type) and the subclass's own declaration is
/// not private. The parent's visibility is not consulted. Only one level is
/// walked: a grandparent method counts only if the parent redeclares it.
/// The result keeps the subclass's method order.
///
/// Returns:
/// - `Ok(None)` when `class` has no parent, or its parent is no longer part
///   of the diagram.
/// - `Ok(Some(methods))` otherwise; `methods` is empty when nothing is
///   overridden.
///
/// # Errors
///
/// Returns [`DiagramError::UnknownClass`] if `class` itself is not in the diagram.
pub fn overridden_methods(
    diagram: &ClassDiagram,
    class: ClassId,
) -> Result<Option<Vec<Member>>, DiagramError> {
    let entity = diagram
        .class(class)
        .ok_or(DiagramError::UnknownClass(class))?;
    let Some(parent_id) = entity.parent() else {
        return Ok(None);
    };
    let Some(parent) = diagram.class(parent_id) else {
        debug!(class:% = class, parent:% = parent_id; "Parent was removed, treating class as parentless");
        return Ok(None);
    };

    let overrides = entity
        .methods()
        .iter()
        .filter(|method| method.is_inheritable() && parent.methods().contains(method))
        .copied()
        .collect();
    Ok(Some(overrides))
}
