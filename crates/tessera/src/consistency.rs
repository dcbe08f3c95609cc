//! Propagation of class-diagram edits into dependent sequence diagrams.
//!
//! A [`ClassDiagram`] publishes a [`DiagramEvent`] whenever a relationship
//! endpoint is rebound. Every live [`DiagramSubscriber`] receives the event
//! synchronously, before the mutating call returns.
//!
//! The container only keeps [`Weak`] references to its subscribers. It never
//! owns a sequence diagram; a subscriber that has been dropped is pruned from
//! the registry at the next publication.
//!
//! The registry is a set: subscribing the same `Rc` twice keeps a single
//! entry.
//!
//! [`SequenceDiagram`] is the stock subscriber. It reacts to *every* event by
//! asking *every* one of its messages to re-evaluate itself against the
//! updated class diagram. The sweep is never narrowed to messages that
//! mention the edited relationship.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use indexmap::IndexMap;
use log::{debug, trace};

use tessera_core::{
    identifier::{ClassId, RelationshipId},
    relationship::RelationshipEnd,
};

use crate::diagram::ClassDiagram;

/// A structural change published by a [`ClassDiagram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagramEvent {
    /// One end of a relationship was (re)bound to a class.
    ///
    /// Published on every rebind, including rebinding to the current class.
    EndpointChanged {
        relationship: RelationshipId,
        end: RelationshipEnd,
        class: ClassId,
    },
}

impl fmt::Display for DiagramEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagramEvent::EndpointChanged {
                relationship,
                end,
                class,
            } => write!(f, "{end} of {relationship} bound to {class}"),
        }
    }
}

/// Receiver of [`DiagramEvent`]s from a class diagram.
///
/// The diagram is passed in its post-change state so the subscriber can
/// re-validate against it. Subscribers cannot mutate the diagram from inside
/// the callback.
pub trait DiagramSubscriber {
    fn on_event(&mut self, event: &DiagramEvent, diagram: &ClassDiagram);
}

/// A sequence-diagram message that can be checked against a class diagram.
///
/// The predicate deciding whether a message is affected belongs to the
/// sequence-diagram model; the notifier only guarantees that it is invoked.
pub trait Message {
    /// Re-evaluates the message and flags it if the class diagram no longer
    /// supports it.
    fn mark_inconsistent_if_affected(&mut self, diagram: &ClassDiagram);
}

/// A named, ordered list of messages subscribed to a class diagram.
///
/// # Examples
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use tessera::{
///     ClassDiagram,
///     consistency::{Message, SequenceDiagram},
///     class::ClassEntity,
///     geometry::AnchorType,
///     relationship::{Relationship, RelationshipKind},
/// };
///
/// #[derive(Default)]
/// struct Checked(usize);
///
/// impl Message for Checked {
///     fn mark_inconsistent_if_affected(&mut self, _diagram: &ClassDiagram) {
///         self.0 += 1;
///     }
/// }
///
/// let mut diagram = ClassDiagram::new();
/// let a = diagram.add_class(ClassEntity::new("A"));
/// let b = diagram.add_class(ClassEntity::new("B"));
/// let rel = diagram
///     .add_relationship(Relationship::new(
///         a, AnchorType::Right, b, AnchorType::Left, RelationshipKind::Association,
///     ))
///     .unwrap();
///
/// let sequence = Rc::new(RefCell::new(SequenceDiagram::new("login")));
/// sequence.borrow_mut().push(Checked::default());
/// diagram.subscribe(&sequence);
///
/// diagram.set_relationship_target(rel, a).unwrap();
/// assert_eq!(sequence.borrow().messages()[0].0, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequenceDiagram<M> {
    name: String,
    messages: Vec<M>,
}

impl<M: Message> SequenceDiagram<M> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    /// Sets the messages (builder style).
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = M>) -> Self {
        self.messages = messages.into_iter().collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn messages(&self) -> &[M] {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut [M] {
        &mut self.messages
    }

    pub fn push(&mut self, message: M) {
        self.messages.push(message);
    }

    /// Asks every message to re-evaluate itself against `diagram`.
    pub fn sweep(&mut self, diagram: &ClassDiagram) {
        trace!(
            sequence_diagram = self.name.as_str(),
            messages = self.messages.len();
            "Re-evaluating sequence diagram messages"
        );
        for message in &mut self.messages {
            message.mark_inconsistent_if_affected(diagram);
        }
    }
}

impl<M: Message> DiagramSubscriber for SequenceDiagram<M> {
    fn on_event(&mut self, _event: &DiagramEvent, diagram: &ClassDiagram) {
        self.sweep(diagram);
    }
}

/// Handle returned by [`ClassDiagram::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Shared handle to a live subscriber.
pub type SharedSubscriber = Rc<RefCell<dyn DiagramSubscriber>>;

/// Ordered registry of weakly held subscribers.
#[derive(Default)]
pub(crate) struct Subscribers {
    entries: IndexMap<SubscriptionId, Weak<RefCell<dyn DiagramSubscriber>>>,
    next_id: u64,
}

impl Subscribers {
    /// Registers `subscriber` once; subscribing it again returns the
    /// existing id.
    pub(crate) fn subscribe<S>(&mut self, subscriber: &Rc<RefCell<S>>) -> SubscriptionId
    where
        S: DiagramSubscriber + 'static,
    {
        let shared: SharedSubscriber = subscriber.clone();
        let weak = Rc::downgrade(&shared);
        if let Some((&id, _)) = self
            .entries
            .iter()
            .find(|(_, existing)| existing.ptr_eq(&weak))
        {
            return id;
        }

        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, weak);
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.entries.shift_remove(&id).is_some()
    }

    /// Number of registered subscribers that are still alive.
    pub(crate) fn live_count(&self) -> usize {
        self.entries
            .values()
            .filter(|subscriber| subscriber.strong_count() > 0)
            .count()
    }

    /// Upgrades all live subscribers in registration order, without pruning.
    pub(crate) fn live(&self) -> Vec<SharedSubscriber> {
        self.entries.values().filter_map(Weak::upgrade).collect()
    }

    /// Drops dead entries and returns the live subscribers in registration order.
    pub(crate) fn prune(&mut self) -> Vec<SharedSubscriber> {
        let before = self.entries.len();
        self.entries
            .retain(|_, subscriber| subscriber.strong_count() > 0);
        let pruned = before - self.entries.len();
        if pruned > 0 {
            debug!(pruned; "Dropped subscribers that no longer exist");
        }
        self.live()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("registered", &self.entries.len())
            .field("live", &self.live_count())
            .finish()
    }
}
