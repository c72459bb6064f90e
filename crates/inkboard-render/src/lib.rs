//! InkBoard Render Library
//!
//! Turns board state into backend-neutral draw commands: the background dot
//! grid, freehand strokes and alignment guides. The host maps each
//! [`DrawCommand`] onto its own drawing API using the camera transform.

pub mod commands;
pub mod grid;

pub use commands::{DrawCommand, OverlayStyle, guide_commands, overlay_commands, stroke_commands};
pub use grid::{GridLayer, GridStyle, StageEvent, grid_bounds, render_grid};
