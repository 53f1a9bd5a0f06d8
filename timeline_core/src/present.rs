// Presentation descriptors: highlight styles, overlay markers, tooltip, sidebar, axis.
// Everything here is plain data for the view adapter; no rendering happens in the engine.

use serde::{Deserialize, Serialize};

use crate::arc::ArcGeometry;
use crate::config::{
    medium_color, AXIS_MAX_LIN, AXIS_MIN, DEFAULT_STROKE, DIMMED_OPACITY, FALLBACK_COLOR,
    FOCAL_OPACITY, HOVER_STROKE, NOW, SELECTED_STROKE, SERIES_LIST_LIMIT, SIBLING_OPACITY,
    SIBLING_STROKE,
};
use crate::dataset::WorkRecord;
use crate::scale::{format_axis_year, AxisScale, Tick};
use crate::types::{ArcStyle, Point, RecordId, ScaleMode};

// -----------------------------------------------------------------------------
// Number formatting
// -----------------------------------------------------------------------------

/// Rounded year with en-US thousands separators. Non-finite values render as "—".
pub fn format_year(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let rounded = value.round();
    let digits = format!("{}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// "1 year" or "N years", on the absolute rounded distance.
pub fn plural_years(value: f64) -> String {
    let years = value.abs().round();
    if years == 1.0 {
        "1 year".to_string()
    } else {
        format!("{} years", format_year(years))
    }
}

/// Set-year label. Far-future works read "> {axis bound}".
pub fn year_label(record: &WorkRecord, scale: &AxisScale) -> String {
    if scale.is_far_future(record.set_year) {
        format!("> {}", format_axis_year(scale.right_bound()))
    } else {
        format_year(record.set_year)
    }
}

// -----------------------------------------------------------------------------
// Highlight
// -----------------------------------------------------------------------------

/// Styles while `focal` owns the highlight: everything dimmed, series siblings
/// half-lit, the focal arc fully lit. Returned in dataset order.
pub fn highlight_styles(
    record_count: usize,
    focal: usize,
    siblings: &[usize],
    selected: bool,
) -> Vec<ArcStyle> {
    let mut styles = vec![ArcStyle::new(DIMMED_OPACITY, DEFAULT_STROKE); record_count];
    for &i in siblings {
        if let Some(style) = styles.get_mut(i) {
            *style = ArcStyle::new(SIBLING_OPACITY, SIBLING_STROKE);
        }
    }
    if let Some(style) = styles.get_mut(focal) {
        let stroke = if selected {
            SELECTED_STROKE
        } else {
            HOVER_STROKE
        };
        *style = ArcStyle::new(FOCAL_OPACITY, stroke);
    }
    styles
}

/// Dataset order with the focal arc moved to the top.
pub fn highlight_order(record_count: usize, focal: usize) -> Vec<usize> {
    (0..record_count)
        .filter(|&i| i != focal)
        .chain((focal < record_count).then_some(focal))
        .collect()
}

// -----------------------------------------------------------------------------
// Overlay
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointMarker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub label: String,
    pub label_y: f64,
    pub caption: String,
    pub caption_y: f64,
}

/// Highlighted strip on the axis for multi-year settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanBand {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Dots at both ends.
    pub ends: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRing {
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub id: RecordId,
    pub color: String,
    pub band: Option<SpanBand>,
    pub endpoints: [EndpointMarker; 2],
    pub ring: Option<SelectionRing>,
}

impl Overlay {
    pub fn build(
        record: &WorkRecord,
        scale: &AxisScale,
        geometry: &ArcGeometry,
        selected: bool,
    ) -> Self {
        let baseline = geometry.baseline();
        let far_future = scale.is_far_future(record.set_year);
        let (x1, x2) =
            geometry.endpoints(scale, record.release_year, record.set_year, far_future);

        let band = record.span.map(|span| {
            let xa = scale.scale(span.start.max(AXIS_MIN));
            let xb = scale.scale(span.end.min(scale.right_bound()));
            SpanBand {
                x: xa.min(xb),
                y: baseline - 3.5,
                width: (xb - xa).abs(),
                height: 7.0,
                ends: [xa, xb],
            }
        });

        // Labels go on the side opposite the arc.
        let (label_y, caption_y) = if record.above_baseline {
            (baseline + 30.0, baseline + 42.0)
        } else {
            (baseline - 18.0, baseline - 6.0)
        };
        let marker = |x: f64, label: String, caption: &str| EndpointMarker {
            x,
            y: baseline,
            radius: 5.0,
            label,
            label_y,
            caption: caption.to_string(),
            caption_y,
        };

        Overlay {
            id: record.id.clone(),
            color: medium_color(record.medium()).to_string(),
            band,
            endpoints: [
                marker(x1, format_year(record.release_year), "released"),
                marker(x2, year_label(record, scale), "set in"),
            ],
            ring: selected.then(|| SelectionRing {
                center: Point::new(x1, baseline),
                radius: 12.0,
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Tooltip
// -----------------------------------------------------------------------------

/// Where the pointer is, and how much room the host has for the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PointerInfo {
    pub page: Point,
    pub viewport_width: f64,
    pub tooltip_width: f64,
}

impl PointerInfo {
    /// Tooltip anchor: up and to the right of the pointer, kept on screen.
    pub fn tooltip_anchor(&self) -> Point {
        let max_x = self.viewport_width - self.tooltip_width - 20.0;
        Point::new(
            (self.page.x + 14.0).min(max_x),
            (self.page.y - 44.0).max(8.0),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub id: RecordId,
    pub title: String,
    pub years: String,
    pub medium: Option<String>,
    pub anchor: Option<Point>,
}

impl Tooltip {
    pub fn build(record: &WorkRecord, scale: &AxisScale, pointer: Option<&PointerInfo>) -> Self {
        Tooltip {
            id: record.id.clone(),
            title: record.title().unwrap_or("—").to_string(),
            years: format!(
                "{} → {}",
                format_year(record.release_year),
                year_label(record, scale)
            ),
            medium: record.medium.clone(),
            anchor: pointer.map(PointerInfo::tooltip_anchor),
        }
    }
}

// -----------------------------------------------------------------------------
// Sidebar
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineCard {
    pub released: String,
    pub distance: String,
    pub set_label: String,
    pub set_color: String,
    pub full_span: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesItem {
    pub id: RecordId,
    pub title: String,
    pub years: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSection {
    pub label: String,
    pub items: Vec<SeriesItem>,
    /// "+ N more" when the list was truncated.
    pub more: Option<String>,
}

/// Everything the sidebar shows for one focal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarContent {
    pub id: RecordId,
    pub title: String,
    pub creator: String,
    pub badges: Vec<Badge>,
    pub timeline: TimelineCard,
    pub notes: Option<String>,
    pub series: Option<SeriesSection>,
    pub predictions: Option<String>,
    pub link: Option<String>,
}

impl SidebarContent {
    pub fn build(record: &WorkRecord, siblings: &[&WorkRecord], scale: &AxisScale) -> Self {
        let color = medium_color(record.medium());

        let mut badges = Vec::new();
        if let Some(medium) = record.medium() {
            badges.push(Badge {
                text: medium.to_string(),
                color: color.to_string(),
            });
        }
        if let Some(genre) = record.genre.as_deref() {
            if Some(genre) != record.medium() {
                badges.push(Badge {
                    text: genre.to_string(),
                    color: FALLBACK_COLOR.to_string(),
                });
            }
        }

        let series = (!siblings.is_empty()).then(|| SeriesSection {
            label: format!("Series · {} works", siblings.len() + 1),
            items: siblings
                .iter()
                .take(SERIES_LIST_LIMIT)
                .map(|s| SeriesItem {
                    id: s.id.clone(),
                    title: s.title().unwrap_or("—").to_string(),
                    years: format!("{} → {}", format_year(s.release_year), year_label(s, scale)),
                })
                .collect(),
            more: (siblings.len() > SERIES_LIST_LIMIT)
                .then(|| format!("+ {} more", siblings.len() - SERIES_LIST_LIMIT)),
        });

        SidebarContent {
            id: record.id.clone(),
            title: record.title().unwrap_or("—").to_string(),
            creator: record.creator.clone().unwrap_or_default(),
            badges,
            timeline: TimelineCard {
                released: format_year(record.release_year),
                distance: format!("↓ {} ahead", plural_years(record.distance())),
                set_label: year_label(record, scale),
                set_color: color.to_string(),
                full_span: record.span_text.clone(),
            },
            notes: record.notes.clone(),
            series,
            predictions: record.predictions.clone(),
            link: record.external_link.clone(),
        }
    }
}

// -----------------------------------------------------------------------------
// Axis
// -----------------------------------------------------------------------------

/// Axis furniture for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisView {
    pub mode: ScaleMode,
    pub left: f64,
    pub right: f64,
    pub baseline: f64,
    pub max_arc_height: f64,
    pub ticks: Vec<Tick>,
    /// Dashed linear/log boundary, log mode only.
    pub split_x: Option<f64>,
    pub today_x: f64,
    /// "> 3000" note past the right edge, linear mode only.
    pub clip_note: Option<String>,
}

impl AxisView {
    pub fn build(scale: &AxisScale, geometry: &ArcGeometry, left: f64) -> Self {
        AxisView {
            mode: scale.mode(),
            left,
            right: scale.right_edge(),
            baseline: geometry.baseline(),
            max_arc_height: geometry.max_height(),
            ticks: scale.ticks(),
            split_x: scale.split_x(),
            today_x: scale.scale(NOW),
            clip_note: (scale.mode() == ScaleMode::Linear)
                .then(|| format!("> {}", format_axis_year(AXIS_MAX_LIN))),
        }
    }
}
