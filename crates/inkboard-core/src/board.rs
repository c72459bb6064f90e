//! Board state: the single writer over shapes and strokes.

use crate::config::GeometryConfig;
use crate::error::{BoardError, BoardResult};
use crate::layout::{LayoutGenerator, LayoutResult};
use crate::placement::Placer;
use crate::shapes::{Shape, ShapeId, normalize};
use crate::snap::{SnapEngine, SnapLine};
use crate::strokes::StrokeModel;
use kurbo::{Point, Rect};
use std::collections::HashMap;
use uuid::Uuid;

/// What happens to a frame's members when the frame is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRemoval {
    /// Keep members on the board without a frame reference.
    Detach,
    /// Remove members together with the frame.
    Cascade,
}

/// A whiteboard: shapes in insertion order, freehand strokes, and the snap
/// state of the current drag.
#[derive(Debug, Clone)]
pub struct Board {
    pub id: String,
    shapes: HashMap<ShapeId, Shape>,
    /// Insertion order; iteration order for snapping and placement.
    order: Vec<ShapeId>,
    strokes: StrokeModel,
    snap: SnapEngine,
    placer: Placer,
    layout: LayoutGenerator,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self::with_config(&GeometryConfig::default())
    }

    pub fn with_config(config: &GeometryConfig) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shapes: HashMap::new(),
            order: Vec::new(),
            strokes: StrokeModel::new(config.strokes.clone()),
            snap: SnapEngine::new(config.snap.clone()),
            placer: Placer::new(config.placement.clone()),
            layout: LayoutGenerator::new(config.layout.clone(), config.placement.clone()),
        }
    }

    /// Build a board from a JSON array of shape records.
    pub fn from_json(json: &str, config: &GeometryConfig) -> BoardResult<Self> {
        let shapes: Vec<Shape> =
            serde_json::from_str(json).map_err(|e| BoardError::Decode(e.to_string()))?;
        let mut board = Self::with_config(config);
        for shape in shapes {
            board.add_shape(shape);
        }
        Ok(board)
    }

    /// Encode the shapes as a JSON array of records, in insertion order.
    pub fn to_json(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|e| BoardError::Encode(e.to_string()))
    }

    /// Add a shape. A shape with an existing id replaces it in place.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id.clone();
        if self.shapes.insert(id.clone(), shape).is_none() {
            self.order.push(id);
        }
    }

    /// Add a shape after moving it to the nearest free spot around its
    /// current position. Returns the position used.
    pub fn place_shape(&mut self, mut shape: Shape) -> Point {
        let bbox = normalize(&shape);
        let others: Vec<Shape> = self
            .shapes_ordered()
            .filter(|s| s.id != shape.id)
            .cloned()
            .collect();
        let origin = self.placer.find_free_position(bbox.origin(), bbox.size(), &others);
        // Keep the record's own anchor convention (center for circles).
        let anchor_offset = shape.position() - bbox.origin();
        shape.set_position(origin + anchor_offset);
        let position = shape.position();
        self.add_shape(shape);
        position
    }

    pub fn remove_shape(&mut self, id: &str) -> Option<Shape> {
        self.order.retain(|shape_id| shape_id != id);
        self.shapes.remove(id)
    }

    pub fn get_shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn get_shape_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Shapes in insertion order.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Owned copy of the shapes in insertion order, for the geometry engines.
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes_ordered().cloned().collect()
    }

    /// Shapes that reference `frame_id` as their frame.
    pub fn members_of<'a>(&'a self, frame_id: &'a str) -> impl Iterator<Item = &'a Shape> + 'a {
        self.shapes_ordered().filter(move |s| s.is_member_of(frame_id))
    }

    /// Remove a frame and apply `policy` to its members. Returns every shape
    /// removed, frame first; empty if the frame does not exist.
    pub fn remove_frame(&mut self, frame_id: &str, policy: FrameRemoval) -> Vec<Shape> {
        let Some(frame) = self.remove_shape(frame_id) else {
            return Vec::new();
        };

        let member_ids: Vec<ShapeId> = self.members_of(frame_id).map(|s| s.id.clone()).collect();
        let mut removed = vec![frame];
        match policy {
            FrameRemoval::Detach => {
                for id in &member_ids {
                    if let Some(shape) = self.shapes.get_mut(id) {
                        shape.stage_group_id = None;
                    }
                }
            }
            FrameRemoval::Cascade => {
                removed.extend(member_ids.iter().filter_map(|id| self.remove_shape(id)));
            }
        }
        log::debug!(
            "Removed frame {} ({:?}, {} members)",
            frame_id,
            policy,
            member_ids.len()
        );
        removed
    }

    /// Generate a layout from `text` near `center` and insert it.
    /// Returns the frame id, or `None` if the text had no list items.
    pub fn insert_generated_layout(&mut self, text: &str, center: Point) -> Option<ShapeId> {
        let snapshot = self.snapshot();
        let result = self.layout.generate(text, center, &snapshot)?;
        let frame_id = result.frame.id.clone();
        self.insert_layout(result);
        Some(frame_id)
    }

    /// Insert a layout result, frame first.
    pub fn insert_layout(&mut self, result: LayoutResult) {
        for shape in result.into_shapes() {
            self.add_shape(shape);
        }
    }

    /// Move `id` toward `proposed`, snapping to other shapes. Returns the
    /// position applied, or `None` for an unknown shape.
    pub fn drag_move(&mut self, id: &str, proposed: Point) -> Option<Point> {
        if !self.shapes.contains_key(id) {
            self.snap.clear_guides();
            return None;
        }
        let snapshot = self.snapshot();
        let position = self.snap.compute_snap(id, proposed, &snapshot);
        if let Some(shape) = self.shapes.get_mut(id) {
            shape.set_position(position);
        }
        Some(position)
    }

    /// Finish a drag: guides disappear.
    pub fn drag_end(&mut self) {
        self.snap.clear_guides();
    }

    /// Guide lines for the current drag.
    pub fn guides(&self) -> &[SnapLine] {
        self.snap.guides()
    }

    pub fn strokes(&self) -> &StrokeModel {
        &self.strokes
    }

    pub fn strokes_mut(&mut self) -> &mut StrokeModel {
        &mut self.strokes
    }

    /// Remove every shape and stroke.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
        self.strokes.clear();
        self.snap.clear_guides();
    }

    /// Bounding rectangle of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes_ordered()
            .map(normalize)
            .reduce(|a, b| a.union(&b))
            .map(Rect::from)
    }
}
