//! Free-space placement for new shapes.
//!
//! Candidate positions walk outward from the desired point along a spiral
//! until one clears every existing shape (plus a buffer). The search is
//! bounded; when it runs out the box goes just to the right of the start.

use crate::shapes::{BoundingBox, Shape, SizeDefaults, normalize_with};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Padding added around every existing shape before collision testing.
pub const COLLISION_BUFFER: f64 = 50.0;

/// Number of spiral positions tried before falling back.
pub const MAX_SPIRAL_ITERATIONS: usize = 150;

/// Angle added per spiral iteration, in radians.
pub const SPIRAL_ANGLE_STEP: f64 = 0.5;

/// Smallest radius increment per spiral iteration.
pub const MIN_SPIRAL_STEP: f64 = 50.0;

/// Placement engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub buffer: f64,
    pub max_iterations: usize,
    pub angle_step: f64,
    pub min_step: f64,
    /// Horizontal gap between the start box and the fallback position.
    pub fallback_gap: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            buffer: COLLISION_BUFFER,
            max_iterations: MAX_SPIRAL_ITERATIONS,
            angle_step: SPIRAL_ANGLE_STEP,
            min_step: MIN_SPIRAL_STEP,
            fallback_gap: COLLISION_BUFFER,
        }
    }
}

/// Spiral free-space search.
#[derive(Debug, Clone, Default)]
pub struct Placer {
    config: PlacementConfig,
}

impl Placer {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Nearest top-left position to `start` where a box of `size` clears all
    /// unlocked `shapes`. Always returns a position.
    pub fn find_free_position(&self, start: Point, size: Size, shapes: &[Shape]) -> Point {
        if shapes.is_empty() {
            return start;
        }

        let obstacles = self.obstacles(shapes);
        let step = self.config.min_step.max(size.width.min(size.height) / 2.0);
        let mut angle: f64 = 0.0;
        let mut radius = 0.0;

        for _ in 0..self.config.max_iterations {
            let candidate = Point::new(start.x + radius * angle.cos(), start.y + radius * angle.sin());
            let candidate_box = BoundingBox::from_origin_size(candidate, size);
            if !obstacles.iter().any(|o| o.overlaps(&candidate_box)) {
                return candidate;
            }
            angle += self.config.angle_step;
            radius += step;
        }

        let fallback = Point::new(start.x + size.width + self.config.fallback_gap, start.y);
        log::warn!(
            "No free slot within {} spiral steps of ({}, {}); falling back to ({}, {})",
            self.config.max_iterations,
            start.x,
            start.y,
            fallback.x,
            fallback.y
        );
        fallback
    }

    /// Whether `candidate` hits any unlocked shape's buffered box.
    pub fn collides(&self, candidate: BoundingBox, shapes: &[Shape]) -> bool {
        self.obstacles(shapes).iter().any(|o| o.overlaps(&candidate))
    }

    fn obstacles(&self, shapes: &[Shape]) -> Vec<BoundingBox> {
        shapes
            .iter()
            .filter(|s| !s.is_locked)
            .map(|s| normalize_with(s, SizeDefaults::COLLISION).inflate(self.config.buffer))
            .collect()
    }
}

/// [`Placer::find_free_position`] with default settings.
pub fn find_free_position(start: Point, size: Size, shapes: &[Shape]) -> Point {
    Placer::default().find_free_position(start, size, shapes)
}
