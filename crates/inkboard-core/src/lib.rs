//! InkBoard Core Library
//!
//! Canvas geometry for the InkBoard whiteboard: shape normalization, snap
//! alignment, free-space placement, text auto-layout and freehand strokes.
//! Everything here is synchronous and works over snapshots of the board's
//! shape collection; the [`Board`] is the only writer.

pub mod board;
pub mod camera;
pub mod config;
pub mod error;
pub mod layout;
pub mod placement;
pub mod shapes;
pub mod snap;
pub mod strokes;
pub mod style;

pub use board::{Board, FrameRemoval};
pub use camera::Camera;
pub use config::GeometryConfig;
pub use error::{BoardError, BoardResult};
pub use layout::{LayoutGenerator, LayoutResult, generate_layout};
pub use placement::{Placer, find_free_position};
pub use shapes::{BoundingBox, Shape, ShapeId, ShapeKind, SizeDefaults, normalize};
pub use snap::{GuideOrientation, SnapEngine, SnapLine};
pub use strokes::{Stroke, StrokeKind, StrokeModel, StrokeOutcome};
pub use style::SerializableColor;
