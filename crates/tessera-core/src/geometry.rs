//! Integer geometry for class boxes and their connection anchors.
//!
//! # Overview
//!
//! - [`Point`] - A pixel position in diagram space
//! - [`Size`] - Width and height of a box
//! - [`Bounds`] - The rectangle covered by a box
//! - [`AnchorType`] - One of the four connection points on a box perimeter
//! - [`Anchors`] - The computed anchor coordinates of a box
//!
//! # Coordinate System
//!
//! Boxes are positioned by their top-left corner, with the origin at the
//! top-left of the canvas:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │        UP
//!     │   ┌────●────┐
//!     │   │         │
//!     │ LEFT●       ●RIGHT
//!     │   │         │
//!     ▼   └────●────┘
//!    +Y       DOWN
//! ```
//!
//! Coordinates are integers so anchor positions are pixel-stable: midpoints
//! use floor division on the (non-negative) box size.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// A pixel position, typically the top-left corner of a class box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i32 {
        self.y
    }

    /// Offsets the point by a non-negative amount along each axis.
    ///
    /// Saturates at the numeric bounds instead of overflowing.
    fn offset(self, dx: u32, dy: u32) -> Self {
        Self {
            x: self.x.saturating_add_unsigned(dx),
            y: self.y.saturating_add_unsigned(dy),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dimensions of a class box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    width: u32,
    height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> u32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> u32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// The rectangle covered by a box, from its top-left to its bottom-right corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    /// Creates bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min: top_left,
            max: top_left.offset(size.width, size.height),
        }
    }

    /// Returns the top-left corner
    pub fn min_point(self) -> Point {
        self.min
    }

    /// Returns the bottom-right corner
    pub fn max_point(self) -> Point {
        self.max
    }

    /// Checks whether `point` lies inside the bounds, edges included.
    pub fn contains(self, point: Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

/// One of the four fixed connection points on a class box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorType {
    Up,
    Right,
    Down,
    Left,
}

impl AnchorType {
    /// All anchors in clockwise order starting from the top.
    pub const ALL: [AnchorType; 4] = [
        AnchorType::Up,
        AnchorType::Right,
        AnchorType::Down,
        AnchorType::Left,
    ];

    fn slot(self) -> usize {
        match self {
            AnchorType::Up => 0,
            AnchorType::Right => 1,
            AnchorType::Down => 2,
            AnchorType::Left => 3,
        }
    }
}

impl fmt::Display for AnchorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnchorType::Up => "up",
            AnchorType::Right => "right",
            AnchorType::Down => "down",
            AnchorType::Left => "left",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown anchor name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown anchor `{0}`, expected one of: up, right, down, left")]
pub struct ParseAnchorError(String);

impl FromStr for AnchorType {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(AnchorType::Up),
            "right" => Ok(AnchorType::Right),
            "down" => Ok(AnchorType::Down),
            "left" => Ok(AnchorType::Left),
            _ => Err(ParseAnchorError(s.to_string())),
        }
    }
}

/// The four anchor coordinates of a box.
///
/// # Examples
///
/// ```
/// # use tessera_core::geometry::{AnchorType, Anchors, Point, Size};
/// let anchors = Anchors::compute(Point::new(50, 50), Size::new(40, 20));
///
/// assert_eq!(anchors.get(AnchorType::Up), Point::new(70, 50));
/// assert_eq!(anchors.get(AnchorType::Right), Point::new(90, 60));
/// assert_eq!(anchors.get(AnchorType::Down), Point::new(70, 70));
/// assert_eq!(anchors.get(AnchorType::Left), Point::new(50, 60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors([Point; 4]);

impl Anchors {
    /// Computes the anchors of a box at `position` with the given `size`.
    ///
    /// - UP    = (x + w/2, y)
    /// - RIGHT = (x + w,   y + h/2)
    /// - DOWN  = (x + w/2, y + h)
    /// - LEFT  = (x,       y + h/2)
    ///
    /// A zero-sized box collapses all four anchors onto `position`.
    pub fn compute(position: Point, size: Size) -> Self {
        let half_width = size.width / 2;
        let half_height = size.height / 2;

        let mut points = [Point::default(); 4];
        points[AnchorType::Up.slot()] = position.offset(half_width, 0);
        points[AnchorType::Right.slot()] = position.offset(size.width, half_height);
        points[AnchorType::Down.slot()] = position.offset(half_width, size.height);
        points[AnchorType::Left.slot()] = position.offset(0, half_height);
        Self(points)
    }

    /// Returns the coordinates of a single anchor.
    pub fn get(&self, anchor: AnchorType) -> Point {
        self.0[anchor.slot()]
    }

    /// Iterates over `(anchor, point)` pairs in clockwise order from the top.
    pub fn iter(&self) -> impl Iterator<Item = (AnchorType, Point)> + '_ {
        AnchorType::ALL.into_iter().map(|anchor| (anchor, self.get(anchor)))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_compute_anchors_default_box() {
        let anchors = Anchors::compute(Point::new(0, 0), Size::new(10, 10));

        assert_eq!(anchors.get(AnchorType::Up), Point::new(5, 0));
        assert_eq!(anchors.get(AnchorType::Right), Point::new(10, 5));
        assert_eq!(anchors.get(AnchorType::Down), Point::new(5, 10));
        assert_eq!(anchors.get(AnchorType::Left), Point::new(0, 5));
    }

    #[test]
    fn test_compute_anchors_odd_size_floors_midpoints() {
        let anchors = Anchors::compute(Point::new(3, 7), Size::new(11, 5));

        assert_eq!(anchors.get(AnchorType::Up), Point::new(8, 7));
        assert_eq!(anchors.get(AnchorType::Right), Point::new(14, 9));
        assert_eq!(anchors.get(AnchorType::Down), Point::new(8, 12));
        assert_eq!(anchors.get(AnchorType::Left), Point::new(3, 9));
    }

    #[test]
    fn test_compute_anchors_zero_size_collapses() {
        let position = Point::new(-4, 12);
        let anchors = Anchors::compute(position, Size::new(0, 0));

        for (_, point) in anchors.iter() {
            assert_eq!(point, position);
        }
    }

    #[test]
    fn test_compute_anchors_saturates() {
        let anchors = Anchors::compute(Point::new(i32::MAX - 1, 0), Size::new(10, 10));
        assert_eq!(anchors.get(AnchorType::Right).x(), i32::MAX);
    }

    #[test]
    fn test_anchor_iter_order() {
        let anchors = Anchors::compute(Point::default(), Size::new(2, 2));
        let order: Vec<AnchorType> = anchors.iter().map(|(anchor, _)| anchor).collect();
        assert_eq!(order, AnchorType::ALL.to_vec());
    }

    #[test]
    fn test_anchor_from_str() {
        assert_eq!("up".parse(), Ok(AnchorType::Up));
        assert_eq!("LEFT".parse(), Ok(AnchorType::Left));
        assert!("north".parse::<AnchorType>().is_err());
        assert_eq!(AnchorType::Down.to_string(), "down");
    }

    #[test]
    fn test_bounds_contains_anchors() {
        let position = Point::new(20, 30);
        let size = Size::new(15, 9);
        let bounds = Bounds::new_from_top_left(position, size);

        assert_eq!(bounds.max_point(), Point::new(35, 39));
        for (_, point) in Anchors::compute(position, size).iter() {
            assert!(bounds.contains(point));
        }
        assert!(!bounds.contains(Point::new(36, 30)));
    }

    proptest! {
        #[test]
        fn prop_anchors_lie_on_box_edges(
            x in -10_000i32..10_000,
            y in -10_000i32..10_000,
            width in 0u32..5_000,
            height in 0u32..5_000,
        ) {
            let anchors = Anchors::compute(Point::new(x, y), Size::new(width, height));
            let w = width as i32;
            let h = height as i32;

            prop_assert_eq!(anchors.get(AnchorType::Up), Point::new(x + w / 2, y));
            prop_assert_eq!(anchors.get(AnchorType::Right), Point::new(x + w, y + h / 2));
            prop_assert_eq!(anchors.get(AnchorType::Down), Point::new(x + w / 2, y + h));
            prop_assert_eq!(anchors.get(AnchorType::Left), Point::new(x, y + h / 2));
        }
    }
}
