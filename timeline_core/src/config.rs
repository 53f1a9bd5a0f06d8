// Build-time constants for the year axis, arc layout, and arc styling.
// Product choices (log split, far-future pinning) live here, not in the scale logic.

/// Leftmost year on the axis in both modes.
pub const AXIS_MIN: f64 = 1700.0;
/// Linear-mode upper bound. Anything later is "far future".
pub const AXIS_MAX_LIN: f64 = 3000.0;
/// Year where the log-hybrid axis switches from linear to logarithmic.
pub const LOG_CUTOFF: f64 = 3000.0;
/// Fraction of the inner width given to the linear portion in log mode.
pub const LOG_SPLIT_FRAC: f64 = 0.60;
/// Right-edge year in log mode.
pub const LOG_MAX: f64 = 1e13;
/// "Today" reference year for the now marker.
pub const NOW: f64 = 2026.0;

/// First labelled tick on the linear portion of the axis.
pub const TICK_START: f64 = 1800.0;
pub const TICK_STEP: f64 = 100.0;
/// Round years added as ticks in log mode.
pub const LOG_TICKS: [f64; 7] = [5e3, 1e4, 5e4, 1e5, 1e6, 1e9, 1e12];

/// Pixel margins around the drawable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

pub const MARGIN: Margin = Margin {
    left: 56.0,
    right: 36.0,
    top: 32.0,
    bottom: 48.0,
};

/// Arc height = pixel span × ratio, clamped to `[ARC_MIN_H, max_arc_h]`.
pub const ARC_HEIGHT_RATIO: f64 = 0.76;
pub const ARC_MIN_H: f64 = 6.0;
/// `max_arc_h = min(inner_height × ARC_MAX_H_FRAC, ARC_MAX_H_ABS)`.
pub const ARC_MAX_H_FRAC: f64 = 0.46;
pub const ARC_MAX_H_ABS: f64 = 480.0;

pub const DEFAULT_OPACITY: f64 = 0.22;
pub const DEFAULT_STROKE: f64 = 1.2;
pub const GHOST_OPACITY: f64 = 0.03;
pub const SEARCH_OPACITY_BOOST: f64 = 2.8;
pub const SEARCH_OPACITY_CAP: f64 = 0.7;
pub const FILTERED_STROKE: f64 = 2.0;

pub const DIMMED_OPACITY: f64 = 0.04;
pub const SIBLING_OPACITY: f64 = 0.50;
pub const SIBLING_STROKE: f64 = 1.8;
pub const FOCAL_OPACITY: f64 = 1.0;
pub const HOVER_STROKE: f64 = 2.8;
pub const SELECTED_STROKE: f64 = 3.5;

/// Tooltip hide delay, so moving between adjacent arcs doesn't flicker.
pub const TOOLTIP_HIDE_DELAY_MS: f64 = 120.0;
/// Sidebar series list shows at most this many siblings.
pub const SERIES_LIST_LIMIT: usize = 14;

pub const FALLBACK_COLOR: &str = "#8888aa";

/// Medium → display color. Order here is the tie-break order for filter buttons.
pub const MEDIUM_COLORS: [(&str, &str); 10] = [
    ("film", "#FF8CA1"),
    ("prose fiction", "#00B0BE"),
    ("television", "#FFB255"),
    ("video game", "#8FD7D7"),
    ("comics", "#c084fc"),
    ("radio", "#86efac"),
    ("tabletop game", "#fbbf24"),
    ("drama", "#fb923c"),
    ("ride", "#f9a8d4"),
    ("illustration", "#d4d4aa"),
];

/// Display color for a medium; unknown or absent mediums get the fallback.
pub fn medium_color(medium: Option<&str>) -> &'static str {
    let Some(medium) = medium.map(str::trim) else {
        return FALLBACK_COLOR;
    };
    MEDIUM_COLORS
        .iter()
        .find(|(name, _)| *name == medium)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}
