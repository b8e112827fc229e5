//! Placement math for generated shapes and inserted icons.
//!
//! Everything is expressed relative to the host viewport centre; nodes are
//! positioned by their top-left corner.

use serde::{Deserialize, Serialize};

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Bounds {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }

    /// Union of many boxes, `None` when empty.
    pub fn enclosing<'a>(boxes: impl IntoIterator<Item = &'a Bounds>) -> Option<Bounds> {
        boxes
            .into_iter()
            .fold(None, |acc: Option<Bounds>, b| match acc {
                Some(a) => Some(a.union(b)),
                None => Some(*b),
            })
    }
}

/// Top-left corners of `count` equally sized shapes laid out as a
/// horizontal row around `center`.
///
/// Consecutive shapes are `width + spacing` apart. The row is centred on
/// the origins, so a single shape gets its origin exactly on `center`.
pub fn row_positions(center: Point, width: f32, spacing: f32, count: usize) -> Vec<Point> {
    let pitch = width + spacing;
    let start_x = center.x - (count.saturating_sub(1) as f32 * pitch) / 2.0;
    (0..count)
        .map(|i| Point::new(start_x + i as f32 * pitch, center.y))
        .collect()
}

/// Top-left corner that centres a `width × height` box on `center`.
pub fn centered_origin(center: Point, width: f32, height: f32) -> Point {
    Point::new(center.x - width / 2.0, center.y - height / 2.0)
}

/// Top-left corners for boxes of varying size laid left → right with a
/// fixed `gap`, the whole strip centred on `center` and each box centred
/// vertically.
pub fn strip_positions(center: Point, sizes: &[(f32, f32)], gap: f32) -> Vec<Point> {
    if sizes.is_empty() {
        return Vec::new();
    }
    let total: f32 =
        sizes.iter().map(|(w, _)| *w).sum::<f32>() + gap * (sizes.len() - 1) as f32;
    let mut x = center.x - total / 2.0;
    sizes
        .iter()
        .map(|&(w, h)| {
            let origin = Point::new(x, center.y - h / 2.0);
            x += w + gap;
            origin
        })
        .collect()
}
