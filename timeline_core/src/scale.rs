// Year → pixel mapping for the shared horizontal axis.
// Linear mode clamps to [AXIS_MIN, AXIS_MAX_LIN]; log-hybrid mode keeps the same linear
// sub-scale up to LOG_CUTOFF and goes logarithmic out to LOG_MAX.

use serde::{Deserialize, Serialize};

use crate::config::{
    AXIS_MAX_LIN, AXIS_MIN, LOG_CUTOFF, LOG_MAX, LOG_SPLIT_FRAC, LOG_TICKS, TICK_START, TICK_STEP,
};
use crate::types::{Layout, ScaleMode};

/// Linear interpolation from a year domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    /// Unclamped mapping.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Base-10 logarithmic mapping. Domain bounds must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LogScale { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (l0, l1) = (self.domain.0.log10(), self.domain.1.log10());
        let (r0, r1) = self.range;
        if l1 == l0 {
            return r0;
        }
        r0 + (value.log10() - l0) / (l1 - l0) * (r1 - r0)
    }
}

/// One axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub year: f64,
    pub x: f64,
    pub label: String,
}

/// The axis mapping for one layout and mode. Rebuilt whole on every resize or mode change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisScale {
    Linear {
        scale: LinearScale,
        right_edge: f64,
    },
    LogHybrid {
        linear: LinearScale,
        log: LogScale,
        split_x: f64,
        right_edge: f64,
    },
}

impl AxisScale {
    pub fn build(mode: ScaleMode, layout: &Layout) -> Self {
        let left = layout.left();
        let right_edge = layout.right();

        match mode {
            ScaleMode::Linear => AxisScale::Linear {
                scale: LinearScale::new((AXIS_MIN, AXIS_MAX_LIN), (left, right_edge)),
                right_edge,
            },
            ScaleMode::Log => {
                let split_x = left + layout.inner_width() * LOG_SPLIT_FRAC;
                AxisScale::LogHybrid {
                    linear: LinearScale::new((AXIS_MIN, LOG_CUTOFF), (left, split_x)),
                    log: LogScale::new((LOG_CUTOFF, LOG_MAX), (split_x, right_edge)),
                    split_x,
                    right_edge,
                }
            }
        }
    }

    pub fn mode(&self) -> ScaleMode {
        match self {
            AxisScale::Linear { .. } => ScaleMode::Linear,
            AxisScale::LogHybrid { .. } => ScaleMode::Log,
        }
    }

    /// Pixel x for a year.
    pub fn scale(&self, year: f64) -> f64 {
        match self {
            AxisScale::Linear { scale, .. } => scale.map(year.clamp(AXIS_MIN, AXIS_MAX_LIN)),
            AxisScale::LogHybrid {
                linear,
                log,
                right_edge,
                ..
            } => {
                if year <= LOG_CUTOFF {
                    linear.map(year.max(AXIS_MIN))
                } else {
                    log.map(year.min(LOG_MAX)).min(*right_edge)
                }
            }
        }
    }

    /// Last year the axis can show.
    pub fn right_bound(&self) -> f64 {
        match self {
            AxisScale::Linear { .. } => AXIS_MAX_LIN,
            AxisScale::LogHybrid { .. } => LOG_MAX,
        }
    }

    /// True when `year` lies past the visible right edge.
    pub fn is_far_future(&self, year: f64) -> bool {
        year > self.right_bound()
    }

    /// Year a far-future arc is pinned to.
    pub fn pinned_year(&self, year: f64) -> f64 {
        year.min(self.right_bound())
    }

    pub fn right_edge(&self) -> f64 {
        match self {
            AxisScale::Linear { right_edge, .. } | AxisScale::LogHybrid { right_edge, .. } => {
                *right_edge
            }
        }
    }

    /// X of the linear/log boundary, log mode only.
    pub fn split_x(&self) -> Option<f64> {
        match self {
            AxisScale::Linear { .. } => None,
            AxisScale::LogHybrid { split_x, .. } => Some(*split_x),
        }
    }

    /// Century ticks over the linear domain, then round log-mode years that still fit.
    pub fn ticks(&self) -> Vec<Tick> {
        let linear_top = match self {
            AxisScale::Linear { .. } => AXIS_MAX_LIN,
            AxisScale::LogHybrid { .. } => LOG_CUTOFF,
        };

        let mut ticks = Vec::new();
        let mut year = TICK_START;
        while year <= linear_top {
            ticks.push(Tick {
                year,
                x: self.scale(year),
                label: format_axis_year(year),
            });
            year += TICK_STEP;
        }

        if let AxisScale::LogHybrid { right_edge, .. } = self {
            for year in LOG_TICKS {
                let x = self.scale(year);
                if x > right_edge - 2.0 {
                    continue;
                }
                ticks.push(Tick {
                    year,
                    x,
                    label: format_axis_year(year),
                });
            }
        }

        ticks
    }
}

/// Compact axis label: plain years below 10k, then k/M/B/T suffixes.
pub fn format_axis_year(year: f64) -> String {
    let (value, suffix) = if year < 1e4 {
        return format!("{}", year);
    } else if year < 1e6 {
        (year / 1e3, "k")
    } else if year < 1e9 {
        (year / 1e6, "M")
    } else if year < 1e12 {
        (year / 1e9, "B")
    } else {
        (year / 1e12, "T")
    };
    format!("{}{}", value.round(), suffix)
}
