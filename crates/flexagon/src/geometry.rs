//! Core geometry types for flexagon.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = small stack values that copy implicitly
//! - `PartialEq` = can compare with `==`
//!
//! Coordinates live in raster space: x grows to the right, y grows DOWN.
//! That flips the visual sense of "increasing angle" to clockwise, which
//! is the order the hexagon wedges are numbered in.

/// A 2D point with sub-pixel x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The point `radius` away from `self` at `degrees` (raster convention,
    /// so positive angles sweep clockwise on screen).
    #[inline]
    pub fn polar_offset(&self, radius: f64, degrees: f64) -> Point {
        let theta = degrees.to_radians();
        Point::new(self.x + radius * theta.cos(), self.y + radius * theta.sin())
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a segment from two points.
    #[inline]
    pub fn between(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

/// Calculate signed area of a point sequence using the shoelace formula.
///
/// ## Rust Lesson #6: Slices
///
/// `&[Point]` borrows any contiguous run of points: a `Vec`, an array,
/// or part of either. The function reads them without taking ownership.
///
/// In raster space (y down) a positive value means the points run
/// clockwise on screen.
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}
