//! Axis-aligned bounding boxes derived from shape geometry.

use super::{Shape, ShapeKind};
use kurbo::{Point, Rect, Size};

/// Canonical axis-aligned box of a shape. Recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl BoundingBox {
    /// Build a box from its edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            center_x: (left + right) / 2.0,
            center_y: (top + bottom) / 2.0,
        }
    }

    /// Box with the given top-left corner and size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }

    /// Shift the box by a delta.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Strict overlap on both axes; boxes that only touch do not overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.x1, rect.y1)
    }
}

impl From<BoundingBox> for Rect {
    fn from(bbox: BoundingBox) -> Self {
        Rect::new(bbox.left, bbox.top, bbox.right, bbox.bottom)
    }
}

/// Sizes assumed for fields a record leaves out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDefaults {
    /// Width/height for rectangles, stages, sticky notes and text.
    pub extent: f64,
    /// Radius for circles and ellipses.
    pub radius: f64,
}

impl SizeDefaults {
    /// Missing sizes collapse to zero.
    pub const EXACT: SizeDefaults = SizeDefaults {
        extent: 0.0,
        radius: 0.0,
    };

    /// Missing radii keep a 50px footprint so unsized circles still repel
    /// new placements.
    pub const COLLISION: SizeDefaults = SizeDefaults {
        extent: 0.0,
        radius: 50.0,
    };
}

impl Default for SizeDefaults {
    fn default() -> Self {
        Self::EXACT
    }
}

/// Reduce a shape to its bounding box, treating missing sizes as zero.
pub fn normalize(shape: &Shape) -> BoundingBox {
    normalize_with(shape, SizeDefaults::EXACT)
}

/// Reduce a shape to its bounding box with explicit defaults for missing sizes.
pub fn normalize_with(shape: &Shape, defaults: SizeDefaults) -> BoundingBox {
    let (x, y) = (shape.x, shape.y);
    match &shape.kind {
        ShapeKind::Rectangle { width, height }
        | ShapeKind::Stage { width, height, .. }
        | ShapeKind::StickyNote { width, height, .. }
        | ShapeKind::Text { width, height, .. } => {
            let width = non_negative(*width, defaults.extent);
            let height = non_negative(*height, defaults.extent);
            BoundingBox::new(x, y, x + width, y + height)
        }
        ShapeKind::Circle { radius } => {
            let radius = non_negative(*radius, defaults.radius);
            BoundingBox::new(x - radius, y - radius, x + radius, y + radius)
        }
        ShapeKind::Ellipse { radius_x, radius_y } => {
            let rx = non_negative(*radius_x, defaults.radius);
            let ry = non_negative(*radius_y, defaults.radius);
            BoundingBox::new(x - rx, y - ry, x + rx, y + ry)
        }
    }
}

// NaN and negative sizes collapse to zero so width/height stay non-negative.
fn non_negative(value: Option<f64>, default: f64) -> f64 {
    value.unwrap_or(default).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_box(bbox: BoundingBox, left: f64, top: f64, right: f64, bottom: f64) {
        assert!((bbox.left - left).abs() < f64::EPSILON, "left {}", bbox.left);
        assert!((bbox.top - top).abs() < f64::EPSILON, "top {}", bbox.top);
        assert!((bbox.right - right).abs() < f64::EPSILON, "right {}", bbox.right);
        assert!((bbox.bottom - bottom).abs() < f64::EPSILON, "bottom {}", bbox.bottom);
    }

    #[test]
    fn test_box_like_variants_are_top_left_anchored() {
        let size = Size::new(100.0, 50.0);
        let origin = Point::new(10.0, 20.0);
        for shape in [
            Shape::rectangle(origin, size),
            Shape::stage(origin, size, "Frame"),
            Shape::sticky_note(origin, size, "note"),
            Shape::text(origin, size, "label"),
        ] {
            assert_box(normalize(&shape), 10.0, 20.0, 110.0, 70.0);
        }
    }

    #[test]
    fn test_circle_is_center_anchored() {
        let bbox = normalize(&Shape::circle(Point::new(50.0, 50.0), 10.0));
        assert_box(bbox, 40.0, 40.0, 60.0, 60.0);
        assert!((bbox.center_x - 50.0).abs() < f64::EPSILON);
        assert!((bbox.center_y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ellipse_bounds() {
        let bbox = normalize(&Shape::ellipse(Point::new(50.0, 50.0), 30.0, 20.0));
        assert_box(bbox, 20.0, 30.0, 80.0, 70.0);
    }

    #[test]
    fn test_missing_sizes_exact() {
        let shape = Shape::with_id(
            "r",
            Point::new(5.0, 5.0),
            ShapeKind::Rectangle {
                width: None,
                height: None,
            },
        );
        assert_box(normalize(&shape), 5.0, 5.0, 5.0, 5.0);

        let circle = Shape::with_id("c", Point::new(5.0, 5.0), ShapeKind::Circle { radius: None });
        assert_box(normalize(&circle), 5.0, 5.0, 5.0, 5.0);
    }

    #[test]
    fn test_missing_radius_in_collision_context() {
        let circle = Shape::with_id("c", Point::new(0.0, 0.0), ShapeKind::Circle { radius: None });
        assert_box(
            normalize_with(&circle, SizeDefaults::COLLISION),
            -50.0,
            -50.0,
            50.0,
            50.0,
        );

        let note = Shape::with_id(
            "n",
            Point::new(0.0, 0.0),
            ShapeKind::StickyNote {
                width: None,
                height: Some(30.0),
                text: String::new(),
            },
        );
        assert_box(normalize_with(&note, SizeDefaults::COLLISION), 0.0, 0.0, 0.0, 30.0);
    }

    #[test]
    fn test_negative_sizes_clamped() {
        let shape = Shape::rectangle(Point::new(0.0, 0.0), Size::new(-10.0, 20.0));
        let bbox = normalize(&shape);
        assert!(bbox.width() >= 0.0);
        assert!((bbox.height() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let touching = BoundingBox::new(10.0, 0.0, 20.0, 10.0);
        let crossing = BoundingBox::new(9.0, 9.0, 20.0, 20.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
        assert!(crossing.overlaps(&a));
    }

    #[test]
    fn test_rect_conversion() {
        let bbox: BoundingBox = Rect::new(30.0, 40.0, 10.0, 20.0).into();
        assert_box(bbox, 10.0, 20.0, 30.0, 40.0);
        let rect: Rect = bbox.inflate(5.0).into();
        assert_eq!(rect, Rect::new(5.0, 15.0, 35.0, 45.0));
    }
}
