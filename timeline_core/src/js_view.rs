// View adapter backed by a JS object of callbacks.
// Each callback receives one JSON string (or nothing), mirroring the batch JSON interface.
//
// Expected shape:
// { renderAxis, renderArcs, renderOverlay, clearOverlay, showSidebar, clearSidebar,
//   showTooltip, moveTooltip, hideTooltip, renderFilters }
// Missing callbacks are skipped.

use js_sys::{Function, Object, Reflect};
use log::{debug, warn};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use crate::filter::MediumButton;
use crate::present::{AxisView, Overlay, SidebarContent, Tooltip};
use crate::types::{ArcDraw, Point};
use crate::view::ViewAdapter;

pub struct JsView {
    callbacks: Object,
}

impl JsView {
    pub fn new(callbacks: Object) -> Self {
        JsView { callbacks }
    }

    fn callback(&self, name: &str) -> Option<Function> {
        let value = Reflect::get(&self.callbacks, &JsValue::from_str(name)).ok()?;
        let function = value.dyn_into::<Function>().ok();
        if function.is_none() {
            debug!("no '{}' view callback", name);
        }
        function
    }

    fn call(&self, name: &str, arg: &JsValue) {
        let Some(function) = self.callback(name) else {
            return;
        };
        if let Err(err) = function.call1(&JsValue::NULL, arg) {
            warn!("view callback '{}' threw: {:?}", name, err);
        }
    }

    fn call_json<T: Serialize + ?Sized>(&self, name: &str, payload: &T) {
        match serde_json::to_string(payload) {
            Ok(json) => self.call(name, &JsValue::from_str(&json)),
            Err(err) => warn!("could not serialize '{}' payload: {}", name, err),
        }
    }
}

impl ViewAdapter for JsView {
    fn render_axis(&mut self, axis: &AxisView) {
        self.call_json("renderAxis", axis);
    }

    fn render_arcs(&mut self, arcs: &[ArcDraw]) {
        self.call_json("renderArcs", arcs);
    }

    fn render_overlay(&mut self, overlay: &Overlay) {
        self.call_json("renderOverlay", overlay);
    }

    fn clear_overlay(&mut self) {
        self.call("clearOverlay", &JsValue::UNDEFINED);
    }

    fn show_sidebar(&mut self, content: &SidebarContent) {
        self.call_json("showSidebar", content);
    }

    fn clear_sidebar(&mut self) {
        self.call("clearSidebar", &JsValue::UNDEFINED);
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        self.call_json("showTooltip", tooltip);
    }

    fn move_tooltip(&mut self, anchor: Point) {
        self.call_json("moveTooltip", &anchor);
    }

    fn hide_tooltip(&mut self) {
        self.call("hideTooltip", &JsValue::UNDEFINED);
    }

    fn render_filters(&mut self, buttons: &[MediumButton]) {
        self.call_json("renderFilters", buttons);
    }
}
