//! The class diagram container.
//!
//! [`ClassDiagram`] owns an ordered arena of class entities and the
//! relationships between them. Order is meaningful: a class's position in the
//! arena is its positional index, the form rendering and persistence
//! collaborators use. Entities are referenced by stable handles; the index is
//! derived from a handle on demand through [`ClassDiagram::index_of`].
//!
//! Relationship endpoint rebinding is routed through the container so every
//! rebind is published to the subscribed sequence diagrams
//! (see [`consistency`](crate::consistency)).

use std::{cell::RefCell, rc::Rc};

use log::{debug, warn};
use thiserror::Error;

use tessera_core::{
    class::ClassEntity,
    identifier::{ClassId, RelationshipId},
    member::Member,
    relationship::{Relationship, RelationshipEnd},
};

use crate::{
    config::DiagramConfig,
    consistency::{DiagramEvent, DiagramSubscriber, SharedSubscriber, Subscribers, SubscriptionId},
    inheritance,
};

/// Errors raised by diagram operations that receive a handle the diagram
/// does not contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("{0} is not part of this diagram")]
    UnknownClass(ClassId),

    #[error("{0} is not part of this diagram")]
    UnknownRelationship(RelationshipId),
}

/// An ordered collection of class entities, their relationships and the
/// sequence diagrams that depend on them.
///
/// # Thread Safety
///
/// The container is single-threaded: subscribers are held through
/// `Rc`/`RefCell`, which makes the type neither `Send` nor `Sync`. No
/// mutator synchronises internally.
///
/// # Examples
///
/// ```
/// use tessera::{
///     ClassDiagram,
///     class::ClassEntity,
///     member::{Member, Visibility},
/// };
///
/// let mut diagram = ClassDiagram::new();
/// let animal = diagram.add_class(
///     ClassEntity::new("Animal").with_methods([Member::method("speak", Visibility::Public)]),
/// );
/// let dog = diagram.add_class(ClassEntity::new("Dog").with_methods([
///     Member::method("bark", Visibility::Public),
///     Member::method("speak", Visibility::Public),
/// ]));
///
/// assert_eq!(diagram.set_parent(dog, animal).unwrap(), Some(0));
///
/// let overrides = diagram.overridden_methods(dog).unwrap().expect("Dog has a parent");
/// assert_eq!(overrides.len(), 1);
/// assert_eq!(overrides[0].name(), "speak");
/// ```
#[derive(Debug, Default)]
pub struct ClassDiagram {
    config: DiagramConfig,
    classes: Vec<(ClassId, ClassEntity)>,
    relationships: Vec<(RelationshipId, Relationship)>,
    subscribers: Subscribers,
}

impl ClassDiagram {
    /// Creates an empty diagram with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty diagram with the given configuration.
    pub fn with_config(config: DiagramConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Appends a class and returns its handle.
    pub fn add_class(&mut self, class: ClassEntity) -> ClassId {
        let id = ClassId::fresh();
        debug!(class:% = id, name:% = class.name(), index = self.classes.len(); "Adding class");
        self.classes.push((id, class));
        id
    }

    /// Appends a class built from the configured class defaults.
    pub fn add_default_class(&mut self) -> ClassId {
        let class = self.config.class_defaults().build();
        self.add_class(class)
    }

    /// Removes a class and returns it.
    ///
    /// Classes after it move up one position. Parent handles and relationship
    /// endpoints that referred to it are left in place and resolve as absent
    /// from now on.
    pub fn remove_class(&mut self, id: ClassId) -> Option<ClassEntity> {
        let index = self.index_of(id)?;
        let (_, class) = self.classes.remove(index);
        debug!(class:% = id, index; "Removed class");
        Some(class)
    }

    /// Number of classes in the diagram.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterates over classes in positional order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassEntity)> {
        self.classes.iter().map(|(id, class)| (*id, class))
    }

    pub fn contains_class(&self, id: ClassId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassEntity> {
        self.classes
            .iter()
            .find_map(|(candidate, class)| (*candidate == id).then_some(class))
    }

    /// Mutable access to a class for member, name and geometry edits.
    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassEntity> {
        self.classes
            .iter_mut()
            .find_map(|(candidate, class)| (*candidate == id).then_some(class))
    }

    /// Returns the class at a positional index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Use [`get_class_at`](Self::get_class_at)
    /// when the index is not known to be valid.
    pub fn class_at(&self, index: usize) -> &ClassEntity {
        &self.classes[index].1
    }

    /// Returns the class at a positional index, if there is one.
    pub fn get_class_at(&self, index: usize) -> Option<&ClassEntity> {
        self.classes.get(index).map(|(_, class)| class)
    }

    /// Returns the handle of the class at a positional index, if there is one.
    pub fn class_id_at(&self, index: usize) -> Option<ClassId> {
        self.classes.get(index).map(|(id, _)| *id)
    }

    /// Returns the handle of the first class with the given name.
    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        self.classes
            .iter()
            .find_map(|(id, class)| (class.name() == name).then_some(*id))
    }

    /// Resolves a class handle to its current positional index.
    ///
    /// This is an identity scan over the arena: a different class with
    /// identical content never matches. Returns `None` when the class is not
    /// (or no longer) part of this diagram.
    pub fn index_of(&self, id: ClassId) -> Option<usize> {
        self.classes.iter().position(|(candidate, _)| *candidate == id)
    }

    // =========================================================================
    // Inheritance
    // =========================================================================

    /// Makes `parent` the parent of `child` and returns the parent's index.
    ///
    /// If `parent` is not part of this diagram the child's parent is cleared
    /// and `Ok(None)` is returned; the assignment never fails for that reason.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownClass`] if `child` is not in the diagram.
    pub fn set_parent(
        &mut self,
        child: ClassId,
        parent: ClassId,
    ) -> Result<Option<usize>, DiagramError> {
        let parent_index = self.index_of(parent);
        let resolved = parent_index.map(|_| parent);
        let class = self.class_mut(child).ok_or(DiagramError::UnknownClass(child))?;
        class.set_parent(resolved);

        match parent_index {
            Some(index) => {
                debug!(child:% = child, parent:% = parent, index; "Assigned parent");
            }
            None => {
                warn!(child:% = child, parent:% = parent; "Parent is not part of the diagram, clearing parent");
            }
        }
        Ok(parent_index)
    }

    /// Makes the class at `index` the parent of `child` and returns its handle.
    ///
    /// An index outside the diagram clears the child's parent, like
    /// [`set_parent`](Self::set_parent) does for an absent class.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownClass`] if `child` is not in the diagram.
    pub fn set_parent_at(
        &mut self,
        child: ClassId,
        index: usize,
    ) -> Result<Option<ClassId>, DiagramError> {
        let parent = self.class_id_at(index);
        let class = self.class_mut(child).ok_or(DiagramError::UnknownClass(child))?;
        class.set_parent(parent);
        if parent.is_none() {
            warn!(child:% = child, index; "Parent index out of range, clearing parent");
        }
        Ok(parent)
    }

    /// Clears the parent of `child`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownClass`] if `child` is not in the diagram.
    pub fn remove_parent(&mut self, child: ClassId) -> Result<(), DiagramError> {
        self.class_mut(child)
            .ok_or(DiagramError::UnknownClass(child))?
            .remove_parent();
        Ok(())
    }

    /// Resolves the parent of `child` in this diagram.
    ///
    /// Returns `None` when the child is unknown, has no parent, or its parent
    /// has been removed from the diagram.
    pub fn parent_of(&self, child: ClassId) -> Option<(ClassId, &ClassEntity)> {
        let parent = self.class(child)?.parent()?;
        self.class(parent).map(|class| (parent, class))
    }

    /// Positional index of the parent of `child`, if it resolves.
    pub fn parent_index_of(&self, child: ClassId) -> Option<usize> {
        let parent = self.class(child)?.parent()?;
        self.index_of(parent)
    }

    /// Methods of `class` that override a method of its immediate parent.
    ///
    /// See [`inheritance::overridden_methods`].
    pub fn overridden_methods(&self, class: ClassId) -> Result<Option<Vec<Member>>, DiagramError> {
        inheritance::overridden_methods(self, class)
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    /// Adds a relationship and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownClass`] if either endpoint is not in
    /// the diagram.
    pub fn add_relationship(
        &mut self,
        relationship: Relationship,
    ) -> Result<RelationshipId, DiagramError> {
        for class in [relationship.from(), relationship.to()] {
            if !self.contains_class(class) {
                return Err(DiagramError::UnknownClass(class));
            }
        }

        let id = RelationshipId::fresh();
        debug!(
            relationship:% = id,
            from:% = relationship.from(),
            to:% = relationship.to(),
            kind:% = relationship.kind();
            "Adding relationship"
        );
        self.relationships.push((id, relationship));
        Ok(id)
    }

    /// Removes a relationship and returns it.
    pub fn remove_relationship(&mut self, id: RelationshipId) -> Option<Relationship> {
        let index = self
            .relationships
            .iter()
            .position(|(candidate, _)| *candidate == id)?;
        let (_, relationship) = self.relationships.remove(index);
        debug!(relationship:% = id; "Removed relationship");
        Some(relationship)
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find_map(|(candidate, relationship)| (*candidate == id).then_some(relationship))
    }

    /// Iterates over relationships in insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = (RelationshipId, &Relationship)> {
        self.relationships
            .iter()
            .map(|(id, relationship)| (*id, relationship))
    }

    /// Applies an edit (anchors, cardinalities, kind) to a relationship.
    ///
    /// Endpoints are normally rebound with
    /// [`rebind_endpoint`](Self::rebind_endpoint). If `edit` changes an
    /// endpoint anyway, the new class is validated and an
    /// [`EndpointChanged`](DiagramEvent::EndpointChanged) event is published
    /// for every end that changed, exactly as a rebind would.
    ///
    /// # Errors
    ///
    /// - [`DiagramError::UnknownRelationship`] if `id` is not in the diagram.
    /// - [`DiagramError::UnknownClass`] if `edit` bound an endpoint to a class
    ///   that is not in the diagram. The whole edit is rolled back and
    ///   nothing is published.
    pub fn update_relationship(
        &mut self,
        id: RelationshipId,
        edit: impl FnOnce(&mut Relationship),
    ) -> Result<(), DiagramError> {
        let relationship = self.relationship_mut(id)?;
        let before = relationship.clone();
        edit(&mut *relationship);

        let rebound: Vec<(RelationshipEnd, ClassId)> =
            [RelationshipEnd::Source, RelationshipEnd::Target]
                .into_iter()
                .map(|end| (end, relationship.endpoint(end)))
                .filter(|&(end, class)| class != before.endpoint(end))
                .collect();

        if let Some(&(_, unknown)) = rebound
            .iter()
            .find(|(_, class)| !self.contains_class(*class))
        {
            warn!(relationship:% = id, class:% = unknown; "Edit bound an endpoint outside the diagram, rolling back");
            *self.relationship_mut(id)? = before;
            return Err(DiagramError::UnknownClass(unknown));
        }

        for (end, class) in rebound {
            debug!(
                relationship:% = id,
                end:% = end,
                previous:% = before.endpoint(end),
                class:% = class;
                "Rebound relationship endpoint during edit"
            );
            self.publish(DiagramEvent::EndpointChanged {
                relationship: id,
                end,
                class,
            });
        }
        Ok(())
    }

    /// Positional index of the class at one end of a relationship.
    ///
    /// `Ok(None)` means the endpoint class has been removed from the diagram.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownRelationship`] if `id` is not in the diagram.
    pub fn endpoint_index(
        &self,
        id: RelationshipId,
        end: RelationshipEnd,
    ) -> Result<Option<usize>, DiagramError> {
        let relationship = self
            .relationship(id)
            .ok_or(DiagramError::UnknownRelationship(id))?;
        Ok(self.index_of(relationship.endpoint(end)))
    }

    /// Rebinds the source end of a relationship. See [`rebind_endpoint`](Self::rebind_endpoint).
    pub fn set_relationship_source(
        &mut self,
        id: RelationshipId,
        class: ClassId,
    ) -> Result<(), DiagramError> {
        self.rebind_endpoint(id, RelationshipEnd::Source, class)
    }

    /// Rebinds the target end of a relationship. See [`rebind_endpoint`](Self::rebind_endpoint).
    pub fn set_relationship_target(
        &mut self,
        id: RelationshipId,
        class: ClassId,
    ) -> Result<(), DiagramError> {
        self.rebind_endpoint(id, RelationshipEnd::Target, class)
    }

    /// Binds one end of a relationship to `class` and notifies every
    /// subscribed sequence diagram.
    ///
    /// The notification is unconditional: rebinding an end to the class it
    /// already points at publishes the event as well. All subscribers have
    /// processed the event when this returns.
    ///
    /// # Errors
    ///
    /// - [`DiagramError::UnknownRelationship`] if `id` is not in the diagram.
    /// - [`DiagramError::UnknownClass`] if `class` is not in the diagram.
    ///
    /// Nothing is changed or published on error.
    ///
    /// # Panics
    ///
    /// Panics if a subscribed sequence diagram is already mutably borrowed
    /// by the caller.
    pub fn rebind_endpoint(
        &mut self,
        id: RelationshipId,
        end: RelationshipEnd,
        class: ClassId,
    ) -> Result<(), DiagramError> {
        if !self.contains_class(class) {
            return Err(DiagramError::UnknownClass(class));
        }
        let relationship = self.relationship_mut(id)?;
        let previous = relationship.endpoint(end);
        relationship.replace_endpoint(end, class);
        debug!(
            relationship:% = id,
            end:% = end,
            previous:% = previous,
            class:% = class;
            "Rebound relationship endpoint"
        );

        self.publish(DiagramEvent::EndpointChanged {
            relationship: id,
            end,
            class,
        });
        Ok(())
    }

    fn relationship_mut(&mut self, id: RelationshipId) -> Result<&mut Relationship, DiagramError> {
        self.relationships
            .iter_mut()
            .find_map(|(candidate, relationship)| (*candidate == id).then_some(relationship))
            .ok_or(DiagramError::UnknownRelationship(id))
    }

    // =========================================================================
    // Subscribers
    // =========================================================================

    /// Registers a dependent sequence diagram (or any other subscriber).
    ///
    /// Only a weak reference is kept: dropping the last `Rc` unsubscribes
    /// implicitly. Subscribing the same `Rc` again returns its existing id.
    pub fn subscribe<S>(&mut self, subscriber: &Rc<RefCell<S>>) -> SubscriptionId
    where
        S: DiagramSubscriber + 'static,
    {
        let id = self.subscribers.subscribe(subscriber);
        debug!(subscription:? = id; "Subscriber registered");
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Number of subscribers that are still alive.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.live_count()
    }

    /// The live dependent sequence diagrams, in subscription order.
    pub fn sequence_diagrams(&self) -> Vec<SharedSubscriber> {
        self.subscribers.live()
    }

    fn publish(&mut self, event: DiagramEvent) {
        let subscribers = self.subscribers.prune();
        debug!(event:% = event, subscribers = subscribers.len(); "Publishing diagram event");
        for subscriber in subscribers {
            subscriber.borrow_mut().on_event(&event, self);
        }
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::{
        geometry::{AnchorType, Point, Size},
        member::Visibility,
        relationship::RelationshipKind,
    };

    use super::*;
    use crate::config::ClassDefaults;

    /// Subscriber recording every event it receives
    #[derive(Debug, Default)]
    struct EventLog {
        events: Vec<DiagramEvent>,
    }

    impl DiagramSubscriber for EventLog {
        fn on_event(&mut self, event: &DiagramEvent, _diagram: &ClassDiagram) {
            self.events.push(*event);
        }
    }

    /// Handle of a class that lives in another diagram
    fn foreign_class() -> ClassId {
        ClassDiagram::new().add_class(ClassEntity::new("Stranger"))
    }

    fn association(from: ClassId, to: ClassId) -> Relationship {
        Relationship::new(
            from,
            AnchorType::Right,
            to,
            AnchorType::Left,
            RelationshipKind::Association,
        )
    }

    #[test]
    fn test_add_and_lookup_classes() {
        let mut diagram = ClassDiagram::new();
        assert!(diagram.is_empty());

        let animal = diagram.add_class(ClassEntity::new("Animal"));
        let dog = diagram.add_class(ClassEntity::new("Dog"));

        assert_eq!(diagram.len(), 2);
        assert_eq!(diagram.index_of(animal), Some(0));
        assert_eq!(diagram.index_of(dog), Some(1));
        assert_eq!(diagram.class_at(1).name(), "Dog");
        assert_eq!(diagram.class_id_at(0), Some(animal));
        assert_eq!(diagram.find_class("Dog"), Some(dog));
        assert_eq!(diagram.find_class("Cat"), None);
        assert!(diagram.get_class_at(2).is_none());
    }

    #[test]
    fn test_index_of_is_identity_based() {
        let mut diagram = ClassDiagram::new();
        let first = diagram.add_class(ClassEntity::new("Twin"));
        let second = diagram.add_class(ClassEntity::new("Twin"));

        assert_ne!(first, second);
        assert_eq!(diagram.index_of(first), Some(0));
        assert_eq!(diagram.index_of(second), Some(1));

        let mut other = ClassDiagram::new();
        other.add_class(ClassEntity::new("Twin"));
        let stranger = other.add_class(ClassEntity::new("Twin"));
        assert_eq!(diagram.index_of(stranger), None);
    }

    #[test]
    #[should_panic]
    fn test_class_at_out_of_range_panics() {
        let diagram = ClassDiagram::new();
        let _ = diagram.class_at(0);
    }

    #[test]
    fn test_remove_class_shifts_indices() {
        let mut diagram = ClassDiagram::new();
        let a = diagram.add_class(ClassEntity::new("A"));
        let b = diagram.add_class(ClassEntity::new("B"));
        let c = diagram.add_class(ClassEntity::new("C"));

        let removed = diagram.remove_class(b).expect("b is in the diagram");
        assert_eq!(removed.name(), "B");
        assert_eq!(diagram.index_of(a), Some(0));
        assert_eq!(diagram.index_of(b), None);
        assert_eq!(diagram.index_of(c), Some(1));
        assert!(diagram.remove_class(b).is_none());
    }

    #[test]
    fn test_set_parent_resolves_index() {
        let mut diagram = ClassDiagram::new();
        let animal = diagram.add_class(ClassEntity::new("Animal"));
        let dog = diagram.add_class(ClassEntity::new("Dog"));

        assert_eq!(diagram.set_parent(dog, animal), Ok(Some(0)));
        assert_eq!(diagram.parent_index_of(dog), Some(0));
        let (parent_id, parent) = diagram.parent_of(dog).expect("parent resolves");
        assert_eq!(parent_id, animal);
        assert_eq!(parent.name(), "Animal");
    }

    #[test]
    fn test_set_parent_absent_clears_parent() {
        let mut diagram = ClassDiagram::new();
        let animal = diagram.add_class(ClassEntity::new("Animal"));
        let dog = diagram.add_class(ClassEntity::new("Dog"));
        diagram.set_parent(dog, animal).expect("dog exists");

        let mut other = ClassDiagram::new();
        let foreign = other.add_class(ClassEntity::new("Wolf"));

        assert_eq!(diagram.set_parent(dog, foreign), Ok(None));
        assert_eq!(diagram.class(dog).and_then(ClassEntity::parent), None);
    }

    #[test]
    fn test_set_parent_unknown_child_fails() {
        let mut diagram = ClassDiagram::new();
        let animal = diagram.add_class(ClassEntity::new("Animal"));
        let ghost = foreign_class();

        assert_eq!(
            diagram.set_parent(ghost, animal),
            Err(DiagramError::UnknownClass(ghost))
        );
    }

    #[test]
    fn test_set_parent_at_and_remove_parent() {
        let mut diagram = ClassDiagram::new();
        let animal = diagram.add_class(ClassEntity::new("Animal"));
        let dog = diagram.add_class(ClassEntity::new("Dog"));

        assert_eq!(diagram.set_parent_at(dog, 0), Ok(Some(animal)));
        assert_eq!(diagram.set_parent_at(dog, 5), Ok(None));
        assert_eq!(diagram.parent_of(dog).map(|(id, _)| id), None);

        diagram.set_parent_at(dog, 0).expect("dog exists");
        diagram.remove_parent(dog).expect("dog exists");
        assert_eq!(diagram.parent_index_of(dog), None);
    }

    #[test]
    fn test_removed_parent_is_dangling() {
        let mut diagram = ClassDiagram::new();
        let animal = diagram.add_class(ClassEntity::new("Animal"));
        let dog = diagram.add_class(ClassEntity::new("Dog"));
        diagram.set_parent(dog, animal).expect("dog exists");

        diagram.remove_class(animal);

        assert_eq!(diagram.class(dog).and_then(ClassEntity::parent), Some(animal));
        assert!(diagram.parent_of(dog).is_none());
        assert_eq!(diagram.parent_index_of(dog), None);
    }

    #[test]
    fn test_class_mut_keeps_anchors_current() {
        let mut diagram = ClassDiagram::new();
        let dog = diagram.add_class(ClassEntity::new("Dog"));

        let class = diagram.class_mut(dog).expect("dog exists");
        class.set_position(Point::new(50, 50));
        class.set_size(Size::new(40, 20));

        assert_eq!(
            diagram.class(dog).map(|class| class.anchor(AnchorType::Right)),
            Some(Point::new(90, 60))
        );
    }

    #[test]
    fn test_add_default_class_uses_config() {
        let config = DiagramConfig::new(ClassDefaults::new("Untitled", Size::new(100, 60)));
        let mut diagram = ClassDiagram::with_config(config);

        let id = diagram.add_default_class();
        let class = diagram.class(id).expect("class was added");
        assert_eq!(class.name(), "Untitled");
        assert_eq!(class.size(), Size::new(100, 60));
    }

    #[test]
    fn test_add_relationship_validates_endpoints() {
        let mut diagram = ClassDiagram::new();
        let a = diagram.add_class(ClassEntity::new("A"));
        let ghost = foreign_class();

        assert_eq!(
            diagram.add_relationship(association(a, ghost)),
            Err(DiagramError::UnknownClass(ghost))
        );
        assert_eq!(diagram.relationships().count(), 0);
    }

    #[test]
    fn test_endpoint_index() {
        let mut diagram = ClassDiagram::new();
        let a = diagram.add_class(ClassEntity::new("A"));
        let b = diagram.add_class(ClassEntity::new("B"));
        let rel = diagram
            .add_relationship(association(b, a))
            .expect("endpoints exist");

        assert_eq!(diagram.endpoint_index(rel, RelationshipEnd::Source), Ok(Some(1)));
        assert_eq!(diagram.endpoint_index(rel, RelationshipEnd::Target), Ok(Some(0)));

        diagram.remove_class(a);
        assert_eq!(diagram.endpoint_index(rel, RelationshipEnd::Source), Ok(Some(0)));
        assert_eq!(diagram.endpoint_index(rel, RelationshipEnd::Target), Ok(None));
    }

    #[test]
    fn test_rebind_endpoint_updates_relationship() {
        let mut diagram = ClassDiagram::new();
        let a = diagram.add_class(ClassEntity::new("A"));
        let b = diagram.add_class(ClassEntity::new("B"));
        let c = diagram.add_class(ClassEntity::new("C"));
        let rel = diagram
            .add_relationship(association(a, b))
            .expect("endpoints exist");

        diagram.set_relationship_source(rel, c).expect("valid rebind");
        diagram.set_relationship_target(rel, a).expect("valid rebind");

        let relationship = diagram.relationship(rel).expect("relationship exists");
        assert_eq!(relationship.from(), c);
        assert_eq!(relationship.to(), a);
    }

    #[test]
    fn test_rebind_endpoint_rejects_unknown_handles() {
        let mut diagram = ClassDiagram::new();
        let a = diagram.add_class(ClassEntity::new("A"));
        let rel = diagram
            .add_relationship(association(a, a))
            .expect("endpoints exist");
        let ghost_class = foreign_class();
        let ghost_rel = RelationshipId::fresh();

        assert_eq!(
            diagram.set_relationship_target(rel, ghost_class),
            Err(DiagramError::UnknownClass(ghost_class))
        );
        assert_eq!(
            diagram.set_relationship_target(ghost_rel, a),
            Err(DiagramError::UnknownRelationship(ghost_rel))
        );
        assert_eq!(diagram.relationship(rel).map(Relationship::to), Some(a));
    }

    #[test]
    fn test_update_relationship() {
        let mut diagram = ClassDiagram::new();
        let a = diagram.add_class(ClassEntity::new("A"));
        let b = diagram.add_class(ClassEntity::new("B"));
        let rel = diagram
            .add_relationship(association(a, b))
            .expect("endpoints exist");

        diagram
            .update_relationship(rel, |relationship| {
                relationship.set_kind(RelationshipKind::Composition);
                relationship.set_to_cardinality("1..*");
            })
            .expect("relationship exists");

        let relationship = diagram.relationship(rel).expect("relationship exists");
        assert_eq!(relationship.kind().code(), 2);
        assert_eq!(relationship.to_cardinality(), "1..*");

        assert!(diagram.remove_relationship(rel).is_some());
        assert_eq!(
            diagram.update_relationship(rel, |_| {}),
            Err(DiagramError::UnknownRelationship(rel))
        );
    }

    #[test]
    fn test_update_relationship_endpoint_change_is_published() {
        let mut diagram = ClassDiagram::new();
        let a = diagram.add_class(ClassEntity::new("A"));
        let b = diagram.add_class(ClassEntity::new("B"));
        let c = diagram.add_class(ClassEntity::new("C"));
        let rel = diagram
            .add_relationship(association(a, b))
            .expect("endpoints exist");
        let log = Rc::new(RefCell::new(EventLog::default()));
        diagram.subscribe(&log);

        diagram
            .update_relationship(rel, |relationship| {
                relationship.replace_endpoint(RelationshipEnd::Target, c);
                relationship.set_kind(RelationshipKind::Dependency);
            })
            .expect("c is in the diagram");

        assert_eq!(diagram.relationship(rel).map(Relationship::to), Some(c));
        assert_eq!(
            log.borrow().events,
            vec![DiagramEvent::EndpointChanged {
                relationship: rel,
                end: RelationshipEnd::Target,
                class: c,
            }]
        );
    }

    #[test]
    fn test_update_relationship_rejects_foreign_endpoint() {
        let mut diagram = ClassDiagram::new();
        let a = diagram.add_class(ClassEntity::new("A"));
        let b = diagram.add_class(ClassEntity::new("B"));
        let rel = diagram
            .add_relationship(association(a, b))
            .expect("endpoints exist");
        let log = Rc::new(RefCell::new(EventLog::default()));
        diagram.subscribe(&log);
        let ghost = foreign_class();

        assert_eq!(
            diagram.update_relationship(rel, |relationship| {
                relationship.replace_endpoint(RelationshipEnd::Source, ghost);
                relationship.set_kind(RelationshipKind::Composition);
            }),
            Err(DiagramError::UnknownClass(ghost))
        );

        let relationship = diagram.relationship(rel).expect("relationship exists");
        assert_eq!(relationship.from(), a);
        assert_eq!(relationship.kind(), RelationshipKind::Association);
        assert!(log.borrow().events.is_empty());
    }

    #[test]
    fn test_overridden_methods_delegates() {
        let mut diagram = ClassDiagram::new();
        let base = diagram.add_class(
            ClassEntity::new("Base").with_methods([Member::method("run", Visibility::Public)]),
        );
        let derived = diagram.add_class(
            ClassEntity::new("Derived").with_methods([Member::method("run", Visibility::Public)]),
        );
        diagram.set_parent(derived, base).expect("derived exists");

        let overrides = diagram
            .overridden_methods(derived)
            .expect("derived exists")
            .expect("derived has a parent");
        assert_eq!(overrides, vec![Member::method("run", Visibility::Public)]);
        assert_eq!(diagram.overridden_methods(base), Ok(None));
    }
}
