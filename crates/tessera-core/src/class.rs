//! Class entities: named boxes with members, an optional parent and anchors.

use log::trace;

use crate::{
    geometry::{AnchorType, Anchors, Bounds, Point, Size},
    identifier::{ClassId, Id},
    member::Member,
};

/// Name given to classes created without one.
pub const DEFAULT_CLASS_NAME: &str = "defaultName";

/// Width and height of a class created without explicit geometry.
pub const DEFAULT_CLASS_SIZE: Size = Size::new(10, 10);

/// A class (or interface) box in a class diagram.
///
/// The anchors are derived from position and size and are recomputed by every
/// geometry mutator before it returns, so [`anchors`](Self::anchors) is never
/// stale.
///
/// The parent is stored as a [`ClassId`] handle and resolved lazily against
/// the container that owns both classes. A handle whose class has since been
/// removed is simply unresolvable.
///
/// # Examples
///
/// ```
/// use tessera_core::class::ClassEntity;
/// use tessera_core::geometry::{AnchorType, Point, Size};
///
/// let mut dog = ClassEntity::new("Dog");
/// dog.set_position(Point::new(50, 50));
/// dog.set_size(Size::new(40, 20));
///
/// assert_eq!(dog.anchor(AnchorType::Up), Point::new(70, 50));
/// assert_eq!(dog.anchor(AnchorType::Left), Point::new(50, 60));
/// ```
#[derive(Debug, Clone)]
pub struct ClassEntity {
    name: Id,
    parent: Option<ClassId>,
    fields: Vec<Member>,
    methods: Vec<Member>,
    is_interface: bool,
    position: Point,
    size: Size,
    anchors: Anchors,
}

impl Default for ClassEntity {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_NAME)
    }
}

impl ClassEntity {
    /// Creates a class with the given name, no members and no parent,
    /// occupying a default-sized box at the origin.
    pub fn new(name: impl Into<Id>) -> Self {
        let position = Point::default();
        Self {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            methods: Vec::new(),
            is_interface: false,
            position,
            size: DEFAULT_CLASS_SIZE,
            anchors: Anchors::compute(position, DEFAULT_CLASS_SIZE),
        }
    }

    /// Sets the top-left corner of the box (builder style).
    pub fn with_position(mut self, position: Point) -> Self {
        self.set_position(position);
        self
    }

    /// Sets the size of the box (builder style).
    pub fn with_size(mut self, size: Size) -> Self {
        self.set_size(size);
        self
    }

    /// Sets the parent handle (builder style).
    pub fn with_parent(mut self, parent: ClassId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the fields (builder style).
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Member>) -> Self {
        self.set_fields(fields);
        self
    }

    /// Sets the methods (builder style).
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = Member>) -> Self {
        self.set_methods(methods);
        self
    }

    /// Marks the class as an interface or a concrete class (builder style).
    pub fn with_interface(mut self, is_interface: bool) -> Self {
        self.is_interface = is_interface;
        self
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn set_name(&mut self, name: impl Into<Id>) {
        self.name = name.into();
    }

    /// Handle of the parent class, if one was assigned.
    ///
    /// The handle may be dangling; resolve it through the owning container.
    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    /// Assigns or clears the parent handle without validation.
    ///
    /// Prefer the container's parent assignment, which checks that the parent
    /// belongs to the same diagram.
    pub fn set_parent(&mut self, parent: Option<ClassId>) {
        self.parent = parent;
    }

    pub fn remove_parent(&mut self) {
        self.parent = None;
    }

    pub fn fields(&self) -> &[Member] {
        &self.fields
    }

    pub fn methods(&self) -> &[Member] {
        &self.methods
    }

    /// Replaces all fields.
    pub fn set_fields(&mut self, fields: impl IntoIterator<Item = Member>) {
        self.fields = fields.into_iter().collect();
    }

    /// Replaces all methods.
    pub fn set_methods(&mut self, methods: impl IntoIterator<Item = Member>) {
        self.methods = methods.into_iter().collect();
    }

    pub fn add_field(&mut self, field: Member) {
        self.fields.push(field);
    }

    pub fn add_method(&mut self, method: Member) {
        self.methods.push(method);
    }

    pub fn is_interface(&self) -> bool {
        self.is_interface
    }

    pub fn set_interface(&mut self, is_interface: bool) {
        self.is_interface = is_interface;
    }

    /// Top-left corner of the box.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> i32 {
        self.position.x()
    }

    pub fn y(&self) -> i32 {
        self.position.y()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width()
    }

    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// The rectangle covered by the box.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.geometry_changed();
    }

    pub fn set_width(&mut self, width: u32) {
        self.size = Size::new(width, self.size.height());
        self.geometry_changed();
    }

    pub fn set_height(&mut self, height: u32) {
        self.size = Size::new(self.size.width(), height);
        self.geometry_changed();
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.geometry_changed();
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    /// Coordinates of a single anchor.
    pub fn anchor(&self, anchor: AnchorType) -> Point {
        self.anchors.get(anchor)
    }

    /// Single recomputation point for the derived anchors.
    fn geometry_changed(&mut self) {
        self.anchors = Anchors::compute(self.position, self.size);
        trace!(
            class:% = self.name,
            position:% = self.position;
            "Recomputed anchors"
        );
    }
}
