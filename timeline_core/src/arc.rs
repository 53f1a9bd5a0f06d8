// Arc geometry: one quadratic curve per record, bowing above or below the baseline.

use serde::{Deserialize, Serialize};

use crate::config::{ARC_HEIGHT_RATIO, ARC_MIN_H};
use crate::scale::AxisScale;
use crate::types::{Layout, Point};

/// Quadratic curve from `start` through `control` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPath {
    pub start: Point,
    pub control: Point,
    pub end: Point,
    pub height: f64,
}

impl ArcPath {
    /// SVG path data.
    pub fn to_svg(&self) -> String {
        format!(
            "M{},{} Q{},{} {},{}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }
}

/// Vertical layout shared by every arc in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    baseline: f64,
    max_height: f64,
}

impl ArcGeometry {
    pub fn new(layout: &Layout) -> Self {
        ArcGeometry {
            baseline: layout.baseline(),
            max_height: layout.max_arc_height(),
        }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Endpoint x positions. A far-future arc ends at the visible right edge.
    pub fn endpoints(
        &self,
        scale: &AxisScale,
        release_year: f64,
        set_year: f64,
        is_far_future: bool,
    ) -> (f64, f64) {
        let x1 = scale.scale(release_year);
        let x2 = if is_far_future {
            scale.scale(scale.pinned_year(set_year))
        } else {
            scale.scale(set_year)
        };
        (x1, x2)
    }

    /// Curve height for a pixel span. Never below the minimum, even when the span is zero.
    pub fn height_for_span(&self, span: f64) -> f64 {
        (span * ARC_HEIGHT_RATIO).min(self.max_height).max(ARC_MIN_H)
    }

    pub fn arc_path(
        &self,
        scale: &AxisScale,
        release_year: f64,
        set_year: f64,
        is_far_future: bool,
        above_baseline: bool,
    ) -> ArcPath {
        let (x1, x2) = self.endpoints(scale, release_year, set_year, is_far_future);
        let height = self.height_for_span((x2 - x1).abs());
        let control_y = if above_baseline {
            self.baseline - height
        } else {
            self.baseline + height
        };

        ArcPath {
            start: Point::new(x1, self.baseline),
            control: Point::new((x1 + x2) / 2.0, control_y),
            end: Point::new(x2, self.baseline),
            height,
        }
    }
}
