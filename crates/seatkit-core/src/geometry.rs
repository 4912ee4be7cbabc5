//! Points and axis-aligned rectangles in map (world) coordinates.
//!
//! Rectangles are never authored field by field: they come from two drag
//! corners via [`rectangle_from_points`], or from persisted seat coordinates
//! via [`Rectangle::from_origin_size`], which rejects negative sizes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in world coordinates (already transformed out of screen pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Axis-aligned rectangle with non-negative width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawRectangle", into = "RawRectangle")]
pub struct Rectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Serialize, Deserialize)]
struct RawRectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl TryFrom<RawRectangle> for Rectangle {
    type Error = String;

    fn try_from(raw: RawRectangle) -> Result<Self, Self::Error> {
        Rectangle::from_origin_size(raw.x, raw.y, raw.width, raw.height).ok_or_else(|| {
            format!(
                "invalid rectangle x={} y={} width={} height={}",
                raw.x, raw.y, raw.width, raw.height
            )
        })
    }
}

impl From<Rectangle> for RawRectangle {
    fn from(r: Rectangle) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

/// Normalizes two arbitrary corners into a rectangle.
///
/// Order independent; identical points yield a zero-area rectangle.
pub fn rectangle_from_points(p1: Point, p2: Point) -> Rectangle {
    Rectangle {
        x: p1.x.min(p2.x),
        y: p1.y.min(p2.y),
        width: (p1.x - p2.x).abs(),
        height: (p1.y - p2.y).abs(),
    }
}

impl Rectangle {
    /// Same as [`rectangle_from_points`].
    pub fn from_points(p1: Point, p2: Point) -> Self {
        rectangle_from_points(p1, p2)
    }

    /// Builds a rectangle from a stored origin and size.
    ///
    /// Returns `None` for non-finite values or negative dimensions.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        let finite = x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite();
        if !finite || width < 0.0 || height < 0.0 {
            return None;
        }
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the rectangle has no area (a click without a drag).
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive hit test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.max_x() && p.y >= self.y && p.y <= self.max_y()
    }

    /// Corner pair in `[lat, lng]` order as simple-CRS map layers expect:
    /// `[[y + height, x], [y, x + width]]`.
    pub fn to_lat_lng_bounds(&self) -> [[f64; 2]; 2] {
        [[self.max_y(), self.x], [self.y, self.max_x()]]
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}, {:.1}x{:.1})",
            self.x, self.y, self.width, self.height
        )
    }
}
