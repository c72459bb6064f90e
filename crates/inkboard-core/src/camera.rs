//! Stage camera: the pan/zoom transform between screen and world space.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera for a board's stage.
///
/// `position` is the screen-space location of the world origin and `scale`
/// the uniform zoom factor, so `screen = world * scale + position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Stage translation in screen pixels.
    pub position: Vec2,
    /// Uniform zoom factor (1.0 = 100%).
    pub scale: f64,
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
}

fn default_min_scale() -> f64 {
    0.1
}

fn default_max_scale() -> f64 {
    10.0
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera at the given pan offset and zoom.
    pub fn at(position: Vec2, scale: f64) -> Self {
        let camera = Self {
            position,
            ..Self::default()
        };
        Self {
            scale: scale.clamp(camera.min_scale, camera.max_scale),
            ..camera
        }
    }

    /// The stage's absolute transform (world to screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.position) * Affine::scale(self.scale)
    }

    /// Screen to world.
    pub fn inverse_transform(&self) -> Affine {
        self.transform().inverse()
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan by a delta in screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Zoom by `factor`, keeping `screen_point` over the same world point.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let anchor = self.screen_to_world(screen_point);
        self.scale = new_scale;
        self.position = screen_point.to_vec2() - anchor.to_vec2() * self.scale;
    }

    /// World-space rectangle visible through a viewport of the given size.
    pub fn visible_world_rect(&self, viewport: Size) -> Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(viewport.width, viewport.height));
        Rect::from_points(top_left, bottom_right)
    }
}
