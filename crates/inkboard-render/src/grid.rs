//! Background dot grid.
//!
//! Dots sit on a world-space lattice but only the lattice points inside the
//! viewport (plus one cell on the far edges) are emitted, so the amount of
//! work depends on viewport size and zoom, never on how far the camera has
//! been panned.

use crate::commands::DrawCommand;
use inkboard_core::Camera;
use inkboard_core::config::GridConfig;
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;

/// Grid dot appearance.
#[derive(Debug, Clone, Copy)]
pub struct GridStyle {
    pub base_size: f64,
    pub dot_color: Color,
    pub dot_radius: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self::from(&GridConfig::default())
    }
}

impl From<&GridConfig> for GridStyle {
    fn from(config: &GridConfig) -> Self {
        Self {
            base_size: config.base_size,
            dot_color: config.dot_color.into(),
            dot_radius: config.dot_radius,
        }
    }
}

/// Largest lattice index whose world coordinate is still exactly
/// representable; beyond it neighbouring dots collapse together.
const MAX_CELL_INDEX: f64 = (1u64 << 52) as f64;

/// Upper bound on dots emitted for one redraw.
pub const MAX_GRID_DOTS: u64 = 1 << 20;

/// Lattice index at or below `coordinate`, if it is in range.
fn cell_index(coordinate: f64, base_size: f64) -> Option<i64> {
    let cell = (coordinate / base_size).floor();
    (cell.is_finite() && cell.abs() < MAX_CELL_INDEX).then_some(cell as i64)
}

/// World-space lattice range `(start_x, start_y, end_x, end_y)` as cell
/// indices covering the viewport seen through `transform`.
fn grid_cells(transform: Affine, viewport: Size, base_size: f64) -> Option<(i64, i64, i64, i64)> {
    if !base_size.is_finite() || base_size <= 0.0 {
        log::debug!("Grid skipped: base size {} is not positive", base_size);
        return None;
    }
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        log::debug!("Grid skipped: empty viewport {:?}", viewport);
        return None;
    }
    let det = transform.determinant();
    if !det.is_finite() || det.abs() < f64::EPSILON {
        log::debug!("Grid skipped: camera transform is not invertible");
        return None;
    }

    let inv = transform.inverse();
    let corners = [
        inv * Point::ZERO,
        inv * Point::new(viewport.width, 0.0),
        inv * Point::new(0.0, viewport.height),
        inv * Point::new(viewport.width, viewport.height),
    ];
    let world = corners
        .iter()
        .skip(1)
        .fold(Rect::from_points(corners[0], corners[0]), |rect, p| rect.union_pt(*p));

    let cells = [world.x0, world.y0, world.x1, world.y1].map(|c| cell_index(c, base_size));
    let [Some(start_x), Some(start_y), Some(last_x), Some(last_y)] = cells else {
        log::debug!("Grid skipped: visible area {:?} is outside the lattice range", world);
        return None;
    };
    let (end_x, end_y) = (last_x + 1, last_y + 1);

    let columns = (end_x - start_x + 1) as u64;
    let rows = (end_y - start_y + 1) as u64;
    match columns.checked_mul(rows) {
        Some(count) if count <= MAX_GRID_DOTS => Some((start_x, start_y, end_x, end_y)),
        _ => {
            log::debug!("Grid skipped: {}x{} dots exceeds {}", columns, rows, MAX_GRID_DOTS);
            None
        }
    }
}

/// World rectangle spanned by the emitted dots, or `None` if nothing is drawn.
pub fn grid_bounds(transform: Affine, viewport: Size, base_size: f64) -> Option<Rect> {
    let (start_x, start_y, end_x, end_y) = grid_cells(transform, viewport, base_size)?;
    Some(Rect::new(
        start_x as f64 * base_size,
        start_y as f64 * base_size,
        end_x as f64 * base_size,
        end_y as f64 * base_size,
    ))
}

/// One dot per lattice point covering the viewport, in world coordinates.
pub fn render_grid(
    transform: Affine,
    viewport: Size,
    base_size: f64,
    dot_color: Color,
    dot_radius: f64,
) -> Vec<DrawCommand> {
    let Some((start_x, start_y, end_x, end_y)) = grid_cells(transform, viewport, base_size) else {
        return Vec::new();
    };

    let columns = (end_x - start_x + 1) as usize;
    let rows = (end_y - start_y + 1) as usize;
    // Bounded by MAX_GRID_DOTS.
    let mut commands = Vec::with_capacity(columns * rows);
    for i in start_x..=end_x {
        for j in start_y..=end_y {
            commands.push(DrawCommand::FillCircle {
                center: Point::new(i as f64 * base_size, j as f64 * base_size),
                radius: dot_radius,
                color: dot_color,
            });
        }
    }
    commands
}

/// Stage events the grid layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageEvent {
    PointerDown,
    PointerUp,
    DragStart,
    DragMove,
    DragEnd,
    Transform,
    Wheel,
    Resize(Size),
}

impl StageEvent {
    /// Whether the camera may have moved.
    fn moves_camera(self) -> bool {
        matches!(
            self,
            StageEvent::DragStart
                | StageEvent::DragMove
                | StageEvent::DragEnd
                | StageEvent::Transform
                | StageEvent::Wheel
                | StageEvent::Resize(_)
        )
    }
}

/// The background layer: never takes pointer input, redraws when the
/// camera changes.
#[derive(Debug, Clone)]
pub struct GridLayer {
    pub style: GridStyle,
    /// Always false; hit testing skips this layer.
    pub listening: bool,
    viewport: Size,
    commands: Vec<DrawCommand>,
}

impl GridLayer {
    pub fn new(style: GridStyle, viewport: Size) -> Self {
        Self {
            style,
            listening: false,
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Commands from the last redraw.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recompute the dots for `camera`.
    pub fn redraw(&mut self, camera: &Camera) -> &[DrawCommand] {
        self.commands = render_grid(
            camera.transform(),
            self.viewport,
            self.style.base_size,
            self.style.dot_color,
            self.style.dot_radius,
        );
        &self.commands
    }

    /// Apply a stage event. Returns the new commands if the layer redrew.
    pub fn handle_event(&mut self, event: StageEvent, camera: &Camera) -> Option<&[DrawCommand]> {
        if !event.moves_camera() {
            return None;
        }
        if let StageEvent::Resize(size) = event {
            self.viewport = size;
        }
        Some(self.redraw(camera))
    }
}
