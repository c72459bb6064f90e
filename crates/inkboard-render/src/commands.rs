//! Draw commands emitted for the host's drawing backend.

use inkboard_core::snap::SnapLine;
use inkboard_core::strokes::{Stroke, StrokeKind, StrokeModel};
use inkboard_core::{Board, SerializableColor};
use kurbo::Point;
use peniko::Color;

/// One primitive for the host to draw, in world coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    FillCircle {
        center: Point,
        radius: f64,
        color: Color,
    },
    StrokeLine {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
    },
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: Color,
    },
}

/// Colors and widths for overlays drawn above the shapes.
#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub guide_color: Color,
    pub guide_width: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            guide_color: SerializableColor::guide().into(),
            guide_width: 1.0,
        }
    }
}

/// One line per guide, spanning its full extent.
pub fn guide_commands(guides: &[SnapLine], style: &OverlayStyle) -> Vec<DrawCommand> {
    guides
        .iter()
        .map(|guide| {
            let (from, to) = guide.endpoints();
            DrawCommand::StrokeLine {
                from,
                to,
                width: style.guide_width,
                color: style.guide_color,
            }
        })
        .collect()
}

fn stroke_command(stroke: &Stroke) -> Option<DrawCommand> {
    match stroke.kind {
        StrokeKind::Draw if !stroke.points.is_empty() => Some(DrawCommand::Polyline {
            points: stroke.points.clone(),
            width: stroke.width,
            color: stroke.color.into(),
        }),
        _ => None,
    }
}

/// Committed strokes oldest first, then the ink gesture in progress.
///
/// Eraser gestures draw nothing.
pub fn stroke_commands(model: &StrokeModel) -> Vec<DrawCommand> {
    model
        .strokes()
        .iter()
        .chain(model.active())
        .filter_map(stroke_command)
        .collect()
}

/// Strokes and guide lines for a board, in paint order.
pub fn overlay_commands(board: &Board, style: &OverlayStyle) -> Vec<DrawCommand> {
    let mut commands = stroke_commands(board.strokes());
    commands.extend(guide_commands(board.guides(), style));
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::Shape;
    use inkboard_core::snap::GuideOrientation;
    use kurbo::Size;

    #[test]
    fn test_guide_line_spans_extent() {
        let guide = SnapLine {
            orientation: GuideOrientation::Vertical,
            coordinate: 100.0,
            span_start: -50.0,
            span_end: 250.0,
        };
        let commands = guide_commands(&[guide], &OverlayStyle::default());
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            DrawCommand::StrokeLine { from, to, .. } => {
                assert_eq!(*from, Point::new(100.0, -50.0));
                assert_eq!(*to, Point::new(100.0, 250.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_active_ink_is_drawn_but_eraser_is_not() {
        let mut model = StrokeModel::default();
        model.begin(StrokeKind::Draw, Point::ZERO);
        model.extend(Point::new(10.0, 0.0));
        model.end();
        model.begin(StrokeKind::Draw, Point::new(0.0, 50.0));
        assert_eq!(stroke_commands(&model).len(), 2);

        model.begin(StrokeKind::Erase, Point::new(500.0, 500.0));
        let commands = stroke_commands(&model);
        assert_eq!(commands.len(), 1);
        assert!(matches!(&commands[0], DrawCommand::Polyline { points, .. } if points.len() == 2));
    }

    #[test]
    fn test_overlay_follows_drag() {
        let mut board = Board::new();
        board.add_shape(Shape::with_id(
            "a",
            Point::ZERO,
            inkboard_core::ShapeKind::Rectangle {
                width: Some(50.0),
                height: Some(50.0),
            },
        ));
        board.add_shape(Shape::rectangle(Point::new(203.0, 400.0), Size::new(50.0, 50.0)));

        board.drag_move("a", Point::new(200.0, 0.0));
        let commands = overlay_commands(&board, &OverlayStyle::default());
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], DrawCommand::StrokeLine { .. }));

        board.drag_end();
        assert!(overlay_commands(&board, &OverlayStyle::default()).is_empty());
    }
}
