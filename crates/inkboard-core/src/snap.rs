//! Snap alignment for dragged shapes.
//!
//! While a shape is dragged, its proposed box is compared against every other
//! unlocked shape's box. Each axis is solved on its own: the closest edge or
//! center alignment inside the threshold wins and shifts the drag position on
//! that axis only. Winning alignments are reported as guide lines.

use crate::shapes::{BoundingBox, Shape, normalize};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Maximum distance (exclusive) at which an alignment snaps, in world units.
pub const SNAP_THRESHOLD: f64 = 8.0;

/// How far a guide line extends past the aligned boxes on each end.
pub const GUIDE_OVERHANG: f64 = 50.0;

/// Snap engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub threshold: f64,
    pub guide_overhang: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: SNAP_THRESHOLD,
            guide_overhang: GUIDE_OVERHANG,
        }
    }
}

/// Direction of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuideOrientation {
    /// Constant x; produced by horizontal-axis snaps.
    Vertical,
    /// Constant y; produced by vertical-axis snaps.
    Horizontal,
}

/// A guide line to draw while a snap is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapLine {
    pub orientation: GuideOrientation,
    /// The x of a vertical line or the y of a horizontal one.
    pub coordinate: f64,
    pub span_start: f64,
    pub span_end: f64,
}

impl SnapLine {
    /// Endpoints in world coordinates.
    pub fn endpoints(&self) -> (Point, Point) {
        match self.orientation {
            GuideOrientation::Vertical => (
                Point::new(self.coordinate, self.span_start),
                Point::new(self.coordinate, self.span_end),
            ),
            GuideOrientation::Horizontal => (
                Point::new(self.span_start, self.coordinate),
                Point::new(self.span_end, self.coordinate),
            ),
        }
    }
}

/// Result of aligning one box against a set of targets.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// Correction to apply to the dragged position.
    pub dx: f64,
    pub dy: f64,
    pub snapped_x: bool,
    pub snapped_y: bool,
    pub guides: Vec<SnapLine>,
}

impl SnapResult {
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Best alignment found so far on one axis.
#[derive(Debug, Clone, Copy)]
struct AxisMatch {
    diff: f64,
    coordinate: f64,
    target: BoundingBox,
}

/// Keep `candidate` only if it beats the current best. Strict comparison so
/// the first candidate seen wins ties.
fn consider(best: &mut Option<AxisMatch>, candidate: AxisMatch, threshold: f64) {
    let magnitude = candidate.diff.abs();
    if magnitude >= threshold {
        return;
    }
    match best {
        Some(current) if magnitude >= current.diff.abs() => {}
        _ => *best = Some(candidate),
    }
}

/// Align `dragged` against `targets`, each axis independently.
pub fn align_box(dragged: BoundingBox, targets: &[BoundingBox], config: &SnapConfig) -> SnapResult {
    let mut best_x: Option<AxisMatch> = None;
    let mut best_y: Option<AxisMatch> = None;

    for target in targets {
        let x_pairs = [
            (dragged.left, target.left),
            (dragged.left, target.right),
            (dragged.right, target.left),
            (dragged.right, target.right),
            (dragged.center_x, target.center_x),
        ];
        for (from, to) in x_pairs {
            let candidate = AxisMatch {
                diff: to - from,
                coordinate: to,
                target: *target,
            };
            consider(&mut best_x, candidate, config.threshold);
        }

        let y_pairs = [
            (dragged.top, target.top),
            (dragged.top, target.bottom),
            (dragged.bottom, target.top),
            (dragged.bottom, target.bottom),
            (dragged.center_y, target.center_y),
        ];
        for (from, to) in y_pairs {
            let candidate = AxisMatch {
                diff: to - from,
                coordinate: to,
                target: *target,
            };
            consider(&mut best_y, candidate, config.threshold);
        }
    }

    let dx = best_x.map_or(0.0, |m| m.diff);
    let dy = best_y.map_or(0.0, |m| m.diff);
    let snapped = dragged.translate(dx, dy);

    let mut guides = Vec::with_capacity(2);
    if let Some(m) = best_x {
        guides.push(SnapLine {
            orientation: GuideOrientation::Vertical,
            coordinate: m.coordinate,
            span_start: snapped.top.min(m.target.top) - config.guide_overhang,
            span_end: snapped.bottom.max(m.target.bottom) + config.guide_overhang,
        });
    }
    if let Some(m) = best_y {
        guides.push(SnapLine {
            orientation: GuideOrientation::Horizontal,
            coordinate: m.coordinate,
            span_start: snapped.left.min(m.target.left) - config.guide_overhang,
            span_end: snapped.right.max(m.target.right) + config.guide_overhang,
        });
    }

    SnapResult {
        dx,
        dy,
        snapped_x: best_x.is_some(),
        snapped_y: best_y.is_some(),
        guides,
    }
}

/// Snap state for one board: settings plus the guides of the latest drag move.
#[derive(Debug, Clone, Default)]
pub struct SnapEngine {
    config: SnapConfig,
    guides: Vec<SnapLine>,
}

impl SnapEngine {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            guides: Vec::new(),
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Snap a drag of `dragged_id` to `proposed` against the other shapes.
    ///
    /// `proposed` is in the dragged shape's own anchor convention (center for
    /// circles and ellipses). Replaces the current guides with this call's.
    pub fn compute_snap(&mut self, dragged_id: &str, proposed: Point, shapes: &[Shape]) -> Point {
        let Some(dragged) = shapes.iter().find(|s| s.id == dragged_id) else {
            log::debug!("Snap requested for unknown shape {}", dragged_id);
            self.guides.clear();
            return proposed;
        };

        let dragged_box = normalize(&dragged.moved_to(proposed));
        let targets: Vec<BoundingBox> = shapes
            .iter()
            .filter(|s| s.id != dragged_id && !s.is_locked)
            .map(normalize)
            .collect();

        let result = align_box(dragged_box, &targets, &self.config);
        self.guides = result.guides;
        Point::new(proposed.x + result.dx, proposed.y + result.dy)
    }

    /// Guides from the most recent [`compute_snap`](Self::compute_snap).
    pub fn guides(&self) -> &[SnapLine] {
        &self.guides
    }

    /// Drop all guides (drag ended).
    pub fn clear_guides(&mut self) {
        self.guides.clear();
    }
}
