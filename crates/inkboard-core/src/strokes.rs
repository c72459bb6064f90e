//! Freehand ink strokes and the whole-stroke eraser.

use crate::style::SerializableColor;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distance within which an eraser point removes a stroke.
pub const ERASER_RADIUS: f64 = 20.0;

/// Stroke settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    pub eraser_radius: f64,
    pub color: SerializableColor,
    pub width: f64,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            eraser_radius: ERASER_RADIUS,
            color: SerializableColor::ink(),
            width: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrokeKind {
    Draw,
    Erase,
}

/// A freehand path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: String,
    pub points: Vec<Point>,
    pub color: SerializableColor,
    pub width: f64,
    pub kind: StrokeKind,
}

impl Stroke {
    pub fn new(kind: StrokeKind, color: SerializableColor, width: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            points: Vec::new(),
            color,
            width,
            kind,
        }
    }

    /// Build an ink stroke from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        let config = StrokeConfig::default();
        Self {
            points,
            ..Self::new(StrokeKind::Draw, config.color, config.width)
        }
    }

    /// Whether any point of this stroke lies within `radius` of any point of `path`.
    pub fn touches(&self, path: &[Point], radius: f64) -> bool {
        let radius_sq = radius * radius;
        self.points.iter().any(|p| {
            path.iter()
                .any(|q| (p.x - q.x).powi(2) + (p.y - q.y).powi(2) <= radius_sq)
        })
    }
}

/// What happened when a gesture ended.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeOutcome {
    /// An ink stroke was added to the list.
    Committed(String),
    /// An eraser gesture ran; `removed` strokes were dropped.
    Erased { removed: usize },
}

/// Remove every stroke touched by the eraser `path`. Returns the number removed.
pub fn erase_with(path: &[Point], radius: f64, strokes: &mut Vec<Stroke>) -> usize {
    let before = strokes.len();
    strokes.retain(|stroke| !stroke.touches(path, radius));
    before - strokes.len()
}

/// Committed strokes plus the gesture currently being drawn.
#[derive(Debug, Clone, Default)]
pub struct StrokeModel {
    config: StrokeConfig,
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
}

impl StrokeModel {
    pub fn new(config: StrokeConfig) -> Self {
        Self {
            config,
            strokes: Vec::new(),
            active: None,
        }
    }

    /// Change the brush used by subsequent draw gestures.
    pub fn set_brush(&mut self, color: SerializableColor, width: f64) {
        self.config.color = color;
        self.config.width = width;
    }

    /// Start a gesture at `point` (pointer down).
    pub fn begin(&mut self, kind: StrokeKind, point: Point) {
        if let Some(previous) = self.active.take() {
            log::debug!("Discarding unfinished stroke {}", previous.id);
        }
        let mut stroke = Stroke::new(kind, self.config.color, self.config.width);
        stroke.points.push(point);
        self.active = Some(stroke);
    }

    /// Append a point to the active gesture (pointer move).
    pub fn extend(&mut self, point: Point) {
        if let Some(stroke) = self.active.as_mut() {
            stroke.points.push(point);
        }
    }

    /// Finish the active gesture (pointer up).
    ///
    /// Ink strokes are committed; eraser strokes filter the list and are
    /// dropped. Returns `None` when no gesture was active.
    pub fn end(&mut self) -> Option<StrokeOutcome> {
        let stroke = self.active.take()?;
        match stroke.kind {
            StrokeKind::Draw => {
                let id = stroke.id.clone();
                self.strokes.push(stroke);
                Some(StrokeOutcome::Committed(id))
            }
            StrokeKind::Erase => {
                let removed = erase_with(&stroke.points, self.config.eraser_radius, &mut self.strokes);
                Some(StrokeOutcome::Erased { removed })
            }
        }
    }

    /// Discard every stroke, including one still being drawn.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The gesture being drawn, if any.
    pub fn active(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(from: Point, to: Point, samples: usize) -> Vec<Point> {
        (0..=samples)
            .map(|i| from.lerp(to, i as f64 / samples as f64))
            .collect()
    }

    fn draw(model: &mut StrokeModel, points: &[Point]) -> Option<StrokeOutcome> {
        model.begin(StrokeKind::Draw, points[0]);
        for p in &points[1..] {
            model.extend(*p);
        }
        model.end()
    }

    fn erase(model: &mut StrokeModel, points: &[Point]) -> Option<StrokeOutcome> {
        model.begin(StrokeKind::Erase, points[0]);
        for p in &points[1..] {
            model.extend(*p);
        }
        model.end()
    }

    #[test]
    fn test_draw_commits_stroke() {
        let mut model = StrokeModel::default();
        let outcome = draw(&mut model, &line(Point::ZERO, Point::new(100.0, 0.0), 10));
        let id = match outcome {
            Some(StrokeOutcome::Committed(id)) => id,
            other => panic!("unexpected outcome {:?}", other),
        };
        assert_eq!(model.strokes().len(), 1);
        assert_eq!(model.strokes()[0].id, id);
        assert_eq!(model.strokes()[0].points.len(), 11);
        assert!(model.active().is_none());
    }

    #[test]
    fn test_eraser_removes_whole_stroke() {
        let mut model = StrokeModel::default();
        draw(&mut model, &line(Point::ZERO, Point::new(100.0, 0.0), 20));
        let kept = line(Point::new(0.0, 200.0), Point::new(100.0, 200.0), 20);
        draw(&mut model, &kept);

        let outcome = erase(&mut model, &[Point::new(50.0, -30.0), Point::new(50.0, 0.0), Point::new(50.0, 30.0)]);
        assert_eq!(outcome, Some(StrokeOutcome::Erased { removed: 1 }));
        assert_eq!(model.strokes().len(), 1);
        assert_eq!(model.strokes()[0].points, kept);
    }

    #[test]
    fn test_eraser_is_never_stored() {
        let mut model = StrokeModel::default();
        let outcome = erase(&mut model, &[Point::ZERO, Point::new(10.0, 10.0)]);
        assert_eq!(outcome, Some(StrokeOutcome::Erased { removed: 0 }));
        assert!(model.strokes().is_empty());
    }

    #[test]
    fn test_eraser_radius_boundary() {
        let stroke = Stroke::from_points(vec![Point::new(0.0, 0.0)]);
        assert!(stroke.touches(&[Point::new(20.0, 0.0)], ERASER_RADIUS));
        assert!(!stroke.touches(&[Point::new(20.01, 0.0)], ERASER_RADIUS));
    }

    #[test]
    fn test_extend_without_gesture_is_ignored() {
        let mut model = StrokeModel::default();
        model.extend(Point::new(1.0, 1.0));
        assert!(model.active().is_none());
        assert!(model.end().is_none());
    }

    #[test]
    fn test_clear_discards_active_gesture() {
        let mut model = StrokeModel::default();
        draw(&mut model, &[Point::ZERO, Point::new(5.0, 5.0)]);
        model.begin(StrokeKind::Draw, Point::new(1.0, 1.0));
        model.clear();
        assert!(model.strokes().is_empty());
        assert!(model.active().is_none());
        assert!(model.end().is_none());
    }

    #[test]
    fn test_brush_applies_to_new_strokes() {
        let mut model = StrokeModel::default();
        let red = SerializableColor::new(255, 0, 0, 255);
        model.set_brush(red, 8.0);
        draw(&mut model, &[Point::ZERO]);
        assert_eq!(model.strokes()[0].color, red);
        assert!((model.strokes()[0].width - 8.0).abs() < f64::EPSILON);
    }
}
