// Strong typing over strings. Newtypes for record ids, pixel points, and the viewport layout.

use serde::{Deserialize, Serialize};

use crate::config::{ARC_MAX_H_ABS, ARC_MAX_H_FRAC, MARGIN};
use crate::error::EngineError;

/// Stable record identifier (the `record_id` column). Newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pixel position on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Axis scaling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Pure linear mapping of `[AXIS_MIN, AXIS_MAX_LIN]`.
    #[default]
    Linear,
    /// Linear up to `LOG_CUTOFF`, logarithmic up to `LOG_MAX`.
    Log,
}

impl std::str::FromStr for ScaleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "lin" => Ok(ScaleMode::Linear),
            "log" | "logarithmic" => Ok(ScaleMode::Log),
            other => Err(format!("unknown scale mode '{}'", other)),
        }
    }
}

/// Size of the drawing surface, plus the vertical layout derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn new(width: f64, height: f64) -> Self {
        Layout { width, height }
    }

    /// A collapsed surface can't be drawn on; redraws are skipped.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn left(&self) -> f64 {
        MARGIN.left
    }

    /// Rightmost drawable x (width minus the right margin).
    pub fn right(&self) -> f64 {
        self.width - MARGIN.right
    }

    pub fn inner_width(&self) -> f64 {
        self.width - MARGIN.left - MARGIN.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - MARGIN.top - MARGIN.bottom
    }

    /// Shared y of every arc's endpoints.
    pub fn baseline(&self) -> f64 {
        MARGIN.top + self.inner_height() * 0.5
    }

    pub fn max_arc_height(&self) -> f64 {
        (self.inner_height() * ARC_MAX_H_FRAC).min(ARC_MAX_H_ABS)
    }
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub scale_mode: ScaleMode,
    /// Medium buttons toggle individually instead of replacing the filter.
    #[serde(default)]
    pub multi_select: bool,
}

impl EngineConfig {
    pub fn layout(&self) -> Layout {
        Layout::new(self.width, self.height)
    }

    /// Zero is allowed (the surface may not be laid out yet); negative or NaN is not.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Opacity and stroke width of one arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcStyle {
    pub opacity: f64,
    pub stroke_width: f64,
}

impl ArcStyle {
    pub fn new(opacity: f64, stroke_width: f64) -> Self {
        ArcStyle {
            opacity,
            stroke_width,
        }
    }
}

/// Draw descriptor for one arc, handed to the renderer in z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcDraw {
    pub id: RecordId,
    /// SVG path data (`M x1,y Q xm,yc x2,y`).
    pub d: String,
    pub color: String,
    #[serde(flatten)]
    pub style: ArcStyle,
    /// Whether the renderer should deliver pointer events for this arc.
    pub interactive: bool,
}
