//! Shape records for the whiteboard.
//!
//! Shapes arrive from the board host as flat records tagged by `"type"`.
//! Every variant reduces to a [`BoundingBox`] through [`normalize`], which is
//! the only place that knows how each variant's position and size relate.

mod bounds;

pub use bounds::{BoundingBox, SizeDefaults, normalize, normalize_with};

use crate::style::SerializableColor;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes. Opaque to the geometry core.
pub type ShapeId = String;

/// Generate a fresh shape identifier.
pub fn new_shape_id() -> ShapeId {
    Uuid::new_v4().to_string()
}

/// Variant-specific geometry and content.
///
/// Size fields are optional because host records may omit them; the
/// normalizer decides what a missing size means via [`SizeDefaults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ShapeKind {
    Rectangle {
        width: Option<f64>,
        height: Option<f64>,
    },
    /// Positioned by its center.
    Circle { radius: Option<f64> },
    /// Positioned by its center.
    Ellipse {
        #[serde(rename = "radiusX")]
        radius_x: Option<f64>,
        #[serde(rename = "radiusY")]
        radius_y: Option<f64>,
    },
    /// Container frame that groups other shapes by reference.
    Stage {
        width: Option<f64>,
        height: Option<f64>,
        #[serde(default)]
        title: String,
    },
    StickyNote {
        width: Option<f64>,
        height: Option<f64>,
        #[serde(default)]
        text: String,
    },
    Text {
        width: Option<f64>,
        height: Option<f64>,
        #[serde(default)]
        text: String,
    },
}

impl ShapeKind {
    /// Name of the variant as it appears in records.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle { .. } => "rectangle",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Ellipse { .. } => "ellipse",
            ShapeKind::Stage { .. } => "stage",
            ShapeKind::StickyNote { .. } => "stickyNote",
            ShapeKind::Text { .. } => "text",
        }
    }

    /// Whether the record's position is the shape's center rather than its
    /// top-left corner.
    pub fn is_center_anchored(&self) -> bool {
        matches!(self, ShapeKind::Circle { .. } | ShapeKind::Ellipse { .. })
    }
}

/// A shape on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    /// Top-left corner for box-like variants, center for circle/ellipse.
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub kind: ShapeKind,
    /// Locked shapes are never snap or collision targets.
    #[serde(default)]
    pub is_locked: bool,
    /// Frame this shape belongs to. A lookup key, not ownership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_group_id: Option<ShapeId>,
    /// CSS-style fill color, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

impl Shape {
    /// Create a shape with a fresh id.
    pub fn new(position: Point, kind: ShapeKind) -> Self {
        Self::with_id(new_shape_id(), position, kind)
    }

    /// Create a shape with a specific id.
    pub fn with_id(id: impl Into<ShapeId>, position: Point, kind: ShapeKind) -> Self {
        Self {
            id: id.into(),
            x: position.x,
            y: position.y,
            kind,
            is_locked: false,
            stage_group_id: None,
            fill: None,
        }
    }

    pub fn rectangle(position: Point, size: Size) -> Self {
        Self::new(
            position,
            ShapeKind::Rectangle {
                width: Some(size.width),
                height: Some(size.height),
            },
        )
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, ShapeKind::Circle { radius: Some(radius) })
    }

    pub fn ellipse(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self::new(
            center,
            ShapeKind::Ellipse {
                radius_x: Some(radius_x),
                radius_y: Some(radius_y),
            },
        )
    }

    pub fn stage(position: Point, size: Size, title: impl Into<String>) -> Self {
        Self::new(
            position,
            ShapeKind::Stage {
                width: Some(size.width),
                height: Some(size.height),
                title: title.into(),
            },
        )
    }

    pub fn sticky_note(position: Point, size: Size, text: impl Into<String>) -> Self {
        Self::new(
            position,
            ShapeKind::StickyNote {
                width: Some(size.width),
                height: Some(size.height),
                text: text.into(),
            },
        )
    }

    pub fn text(position: Point, size: Size, text: impl Into<String>) -> Self {
        Self::new(
            position,
            ShapeKind::Text {
                width: Some(size.width),
                height: Some(size.height),
                text: text.into(),
            },
        )
    }

    /// Mark the shape as locked.
    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    /// Attach the shape to a frame.
    pub fn in_stage(mut self, stage_id: impl Into<ShapeId>) -> Self {
        self.stage_group_id = Some(stage_id.into());
        self
    }

    /// Set the fill as a `#rrggbb[aa]` string.
    pub fn with_fill(mut self, color: SerializableColor) -> Self {
        self.fill = Some(color.to_hex());
        self
    }

    /// The fill parsed as a hex color. Named or functional CSS colors give `None`.
    pub fn fill_color(&self) -> Option<SerializableColor> {
        self.fill.as_deref().and_then(SerializableColor::from_hex)
    }

    /// The record's anchor point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    /// A copy of this shape re-anchored at `position`.
    pub fn moved_to(&self, position: Point) -> Self {
        let mut moved = self.clone();
        moved.set_position(position);
        moved
    }

    /// Bounding box with missing sizes treated as zero.
    pub fn bounds(&self) -> BoundingBox {
        normalize(self)
    }

    pub fn is_stage(&self) -> bool {
        matches!(self.kind, ShapeKind::Stage { .. })
    }

    /// Whether this shape belongs to the given frame.
    pub fn is_member_of(&self, stage_id: &str) -> bool {
        self.stage_group_id.as_deref() == Some(stage_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_survives_roundtrip() {
        let json = r##"{"id":"r","type":"rectangle","x":0,"y":0,"width":10,"height":10,"fill":"#ff0000"}"##;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(shape.fill.as_deref(), Some("#ff0000"));
        assert_eq!(shape.fill_color(), Some(SerializableColor::new(255, 0, 0, 255)));

        let encoded = serde_json::to_value(&shape).unwrap();
        assert_eq!(encoded["fill"], "#ff0000");

        let plain = Shape::rectangle(Point::ZERO, Size::new(1.0, 1.0));
        assert!(serde_json::to_value(&plain).unwrap().get("fill").is_none());
    }

    #[test]
    fn test_fill_color_accepts_only_hex() {
        let shape = Shape::circle(Point::ZERO, 5.0).with_fill(SerializableColor::new(0, 0, 0, 128));
        assert_eq!(shape.fill.as_deref(), Some("#00000080"));
        assert_eq!(shape.fill_color(), Some(SerializableColor::new(0, 0, 0, 128)));

        let mut named = shape.clone();
        named.fill = Some("rebeccapurple".to_string());
        assert_eq!(named.fill_color(), None);
    }

    #[test]
    fn test_decode_record() {
        let json = r#"{"id":"a","type":"rectangle","x":10,"y":20,"width":100,"height":50}"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(shape.id, "a");
        assert_eq!(shape.position(), Point::new(10.0, 20.0));
        assert!(!shape.is_locked);
        assert_eq!(
            shape.kind,
            ShapeKind::Rectangle {
                width: Some(100.0),
                height: Some(50.0)
            }
        );
    }

    #[test]
    fn test_decode_camel_case_fields() {
        let json = r#"{"id":"e","type":"ellipse","x":0,"y":0,"radiusX":30,"radiusY":20,"isLocked":true,"stageGroupId":"f"}"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert!(shape.is_locked);
        assert!(shape.is_member_of("f"));
        assert_eq!(
            shape.kind,
            ShapeKind::Ellipse {
                radius_x: Some(30.0),
                radius_y: Some(20.0)
            }
        );
    }

    #[test]
    fn test_decode_missing_sizes() {
        let json = r#"{"id":"n","type":"stickyNote","x":0,"y":0}"#;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(
            shape.kind,
            ShapeKind::StickyNote {
                width: None,
                height: None,
                text: String::new()
            }
        );
    }

    #[test]
    fn test_decode_rejects_unknown_variant() {
        let json = r#"{"id":"h","type":"hexagon","x":0,"y":0}"#;
        assert!(serde_json::from_str::<Shape>(json).is_err());
    }

    #[test]
    fn test_moved_to_keeps_identity() {
        let shape = Shape::with_id("s", Point::new(1.0, 2.0), ShapeKind::Circle { radius: Some(5.0) });
        let moved = shape.moved_to(Point::new(10.0, 20.0));
        assert_eq!(moved.id, "s");
        assert_eq!(moved.position(), Point::new(10.0, 20.0));
        assert_eq!(shape.position(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Shape::circle(Point::ZERO, 1.0).kind.name(), "circle");
        assert_eq!(
            Shape::sticky_note(Point::ZERO, Size::new(1.0, 1.0), "").kind.name(),
            "stickyNote"
        );
        assert!(Shape::ellipse(Point::ZERO, 1.0, 2.0).kind.is_center_anchored());
        assert!(!Shape::stage(Point::ZERO, Size::new(1.0, 1.0), "t").kind.is_center_anchored());
    }
}
