//! Geometry configuration.
//!
//! Every section has defaults matching the board's stock behaviour, and every
//! field is optional in JSON so a config file only needs the values it changes.

use crate::error::{BoardError, BoardResult};
use crate::layout::LayoutConfig;
use crate::placement::PlacementConfig;
use crate::snap::SnapConfig;
use crate::strokes::StrokeConfig;
use crate::style::SerializableColor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Grid spacing in world units.
pub const GRID_SIZE: f64 = 20.0;

/// Background grid appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub base_size: f64,
    pub dot_radius: f64,
    pub dot_color: SerializableColor,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_size: GRID_SIZE,
            dot_radius: 1.5,
            dot_color: SerializableColor::grid_dot(),
        }
    }
}

/// All tunables of the geometry core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub snap: SnapConfig,
    pub placement: PlacementConfig,
    pub layout: LayoutConfig,
    pub strokes: StrokeConfig,
    pub grid: GridConfig,
}

impl GeometryConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BoardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> BoardResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| BoardError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BoardError::Encode(e.to_string()))
    }

    /// Reject values the algorithms cannot work with.
    pub fn validate(&self) -> BoardResult<()> {
        let positive = [
            ("snap.threshold", self.snap.threshold),
            ("placement.angle_step", self.placement.angle_step),
            ("placement.min_step", self.placement.min_step),
            ("layout.card_width", self.layout.card_width),
            ("layout.card_height", self.layout.card_height),
            ("grid.base_size", self.grid.base_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(BoardError::Config(format!("{} must be positive, got {}", name, value)));
            }
        }

        let non_negative = [
            ("snap.guide_overhang", self.snap.guide_overhang),
            ("placement.buffer", self.placement.buffer),
            ("placement.fallback_gap", self.placement.fallback_gap),
            ("layout.gap", self.layout.gap),
            ("layout.padding", self.layout.padding),
            ("layout.title_height", self.layout.title_height),
            ("strokes.eraser_radius", self.strokes.eraser_radius),
            ("grid.dot_radius", self.grid.dot_radius),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(BoardError::Config(format!("{} must not be negative, got {}", name, value)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeometryConfig::default();
        assert!((config.snap.threshold - 8.0).abs() < f64::EPSILON);
        assert!((config.placement.buffer - 50.0).abs() < f64::EPSILON);
        assert_eq!(config.placement.max_iterations, 150);
        assert!((config.strokes.eraser_radius - 20.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GeometryConfig::from_json(r#"{"snap":{"threshold":12},"layout":{"gap":10}}"#).unwrap();
        assert!((config.snap.threshold - 12.0).abs() < f64::EPSILON);
        assert!((config.snap.guide_overhang - 50.0).abs() < f64::EPSILON);
        assert!((config.layout.gap - 10.0).abs() < f64::EPSILON);
        assert!((config.layout.card_width - 220.0).abs() < f64::EPSILON);
        assert_eq!(config.placement, PlacementConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GeometryConfig::from_json(r#"{"grid":{"base_size":0}}"#).unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
        let err = GeometryConfig::from_json(r#"{"placement":{"buffer":-1}}"#).unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
        assert!(GeometryConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"strokes":{{"eraser_radius":35}}}}"#).unwrap();
        let config = GeometryConfig::load(file.path()).unwrap();
        assert!((config.strokes.eraser_radius - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GeometryConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BoardError::Io(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = GeometryConfig::default();
        config.grid.base_size = 32.0;
        let json = config.to_json().unwrap();
        assert_eq!(GeometryConfig::from_json(&json).unwrap(), config);
    }
}
