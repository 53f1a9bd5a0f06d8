// timeline_core: Futures Timeline Rust/WASM engine
// Year-axis scaling, arc geometry, filtering, and hover/selection state. JS is plumbing:
// it owns the SVG and the DOM, the engine decides what gets drawn and how.

mod arc;
mod chart;
mod config;
mod dataset;
mod debounce;
mod error;
mod filter;
mod js_view;
mod logging;
mod present;
mod scale;
mod selection;
mod series;
mod types;
mod view;

use wasm_bindgen::prelude::*;

pub use arc::{ArcGeometry, ArcPath};
pub use chart::{Chart, ChartSnapshot, Frame};
pub use config::*;
pub use dataset::{parse_span, Dataset, WorkRecord, YearSpan};
pub use debounce::DebounceTimer;
pub use error::EngineError;
pub use filter::{FilterState, MediumButton};
pub use js_view::JsView;
pub use present::*;
pub use scale::{format_axis_year, AxisScale, LinearScale, LogScale, Tick};
pub use selection::{transition, Effect, Interaction, PointerEvent, Transition};
pub use series::SeriesIndex;
pub use types::*;
pub use view::ViewAdapter;

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Parse and validate the config, then load the dataset. Touches no JS.
fn load(csv_text: &str, config_json: &str) -> Result<(Dataset, EngineConfig), EngineError> {
    let config: EngineConfig = serde_json::from_str(config_json)
        .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
    config.validate()?;
    let dataset = Dataset::from_csv(csv_text)?;
    Ok((dataset, config))
}

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

/// Main engine interface exposed to JavaScript.
/// The host forwards DOM events here; drawing comes back through the callbacks object.
#[wasm_bindgen]
pub struct TimelineEngine {
    chart: Chart<JsView>,
}

#[wasm_bindgen]
impl TimelineEngine {
    /// Load the CSV dataset and draw the first frame.
    ///
    /// `config_json`: `{ "width": 1200, "height": 700, "scale_mode": "linear", "multi_select": false }`
    #[wasm_bindgen(constructor)]
    pub fn new(
        csv_text: &str,
        config_json: &str,
        callbacks: js_sys::Object,
    ) -> Result<TimelineEngine, JsValue> {
        let (dataset, config) = load(csv_text, config_json)?;

        Ok(TimelineEngine {
            chart: Chart::new(dataset, &config, JsView::new(callbacks)),
        })
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.chart.resize(width, height);
    }

    /// `"linear"` or `"log"`.
    pub fn set_scale_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: ScaleMode = mode
            .parse()
            .map_err(|e: String| JsValue::from(EngineError::InvalidConfig(e)))?;
        self.chart.set_scale_mode(mode);
        Ok(())
    }

    /// Press a medium button; `undefined` is "All".
    pub fn toggle_medium(&mut self, medium: Option<String>) {
        self.chart.toggle_medium(medium.as_deref());
    }

    pub fn set_multi_select(&mut self, multi_select: bool) {
        self.chart.set_multi_select(multi_select);
    }

    pub fn set_search(&mut self, query: &str) {
        self.chart.set_search(query);
    }

    pub fn clear_search(&mut self) {
        self.chart.clear_search();
    }

    /// Page coordinates of the enter event are optional; when given, the tooltip
    /// is anchored there instead of at the last `pointer_move`.
    pub fn pointer_enter(&mut self, record_id: &str, page_x: Option<f64>, page_y: Option<f64>) {
        let id = RecordId::new(record_id);
        match (page_x, page_y) {
            (Some(x), Some(y)) => self.chart.pointer_enter_at(&id, Point::new(x, y)),
            _ => self.chart.pointer_enter(&id),
        }
    }

    pub fn pointer_leave(&mut self, now_ms: f64) {
        self.chart.pointer_leave(now_ms);
    }

    pub fn pointer_move(
        &mut self,
        page_x: f64,
        page_y: f64,
        viewport_width: f64,
        tooltip_width: f64,
    ) {
        self.chart.pointer_move(PointerInfo {
            page: Point::new(page_x, page_y),
            viewport_width,
            tooltip_width,
        });
    }

    pub fn click(&mut self, record_id: &str) {
        self.chart.click(&RecordId::new(record_id));
    }

    pub fn click_background(&mut self) {
        self.chart.click_background();
    }

    pub fn preview_enter(&mut self, record_id: &str) {
        self.chart.preview_enter(&RecordId::new(record_id));
    }

    pub fn preview_leave(&mut self) {
        self.chart.preview_leave();
    }

    /// Advance the clock; hides the tooltip once its debounce deadline passes.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.chart.tick(now_ms)
    }

    /// For hosts using `setTimeout`: pass back the generation read at scheduling time.
    pub fn fire_tooltip_timer(&mut self, generation: u64) -> bool {
        self.chart.fire_tooltip_timer(generation)
    }

    pub fn tooltip_deadline(&self) -> Option<f64> {
        self.chart.tooltip_deadline()
    }

    pub fn tooltip_generation(&self) -> u64 {
        self.chart.tooltip_generation()
    }

    pub fn is_active(&self, record_id: &str) -> bool {
        self.chart.is_active(&RecordId::new(record_id))
    }

    pub fn record_count(&self) -> usize {
        self.chart.dataset().len()
    }

    pub fn dropped_count(&self) -> usize {
        self.chart.dataset().dropped()
    }

    /// Interaction state as JSON.
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.chart.snapshot()).map_err(|e| EngineError::from(e).into())
    }
}
