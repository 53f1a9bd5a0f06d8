// Chart: immutable dataset + interaction state, driving the view adapter.
// Redraws are full rebuilds of the frame; interaction changes go through the
// pure state machine in `selection` and come back as effects applied here.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::arc::ArcGeometry;
use crate::config::{medium_color, TOOLTIP_HIDE_DELAY_MS};
use crate::dataset::Dataset;
use crate::debounce::DebounceTimer;
use crate::filter::FilterState;
use crate::present::{
    highlight_order, highlight_styles, AxisView, Overlay, PointerInfo, SidebarContent, Tooltip,
};
use crate::scale::AxisScale;
use crate::selection::{self, Effect, Interaction, PointerEvent};
use crate::series::SeriesIndex;
use crate::types::{ArcDraw, ArcStyle, EngineConfig, Layout, Point, RecordId, ScaleMode};
use crate::view::ViewAdapter;

/// Everything derived from (layout, mode). Rebuilt on every resize or mode switch.
#[derive(Debug, Clone)]
pub struct Frame {
    pub scale: AxisScale,
    pub geometry: ArcGeometry,
    /// Per record, dataset order. Never carried across frames.
    pub far_future: Vec<bool>,
    pub paths: Vec<String>,
}

impl Frame {
    fn build(dataset: &Dataset, mode: ScaleMode, layout: &Layout) -> Self {
        let scale = AxisScale::build(mode, layout);
        let geometry = ArcGeometry::new(layout);
        let far_future: Vec<bool> = dataset
            .records()
            .iter()
            .map(|r| scale.is_far_future(r.set_year))
            .collect();
        let paths = dataset
            .records()
            .iter()
            .zip(&far_future)
            .map(|(r, &far)| {
                geometry
                    .arc_path(&scale, r.release_year, r.set_year, far, r.above_baseline)
                    .to_svg()
            })
            .collect();

        Frame {
            scale,
            geometry,
            far_future,
            paths,
        }
    }
}

/// Serializable view of the interaction state, for hosts and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub interaction: Interaction,
    pub scale_mode: ScaleMode,
    pub query: String,
    pub mediums: Vec<String>,
    pub multi_select: bool,
    pub tooltip_hide_pending: bool,
}

pub struct Chart<V: ViewAdapter> {
    dataset: Dataset,
    series: SeriesIndex,
    filter: FilterState,
    interaction: Interaction,
    mode: ScaleMode,
    layout: Layout,
    frame: Option<Frame>,
    tooltip_timer: DebounceTimer,
    pointer: Option<PointerInfo>,
    now_ms: f64,
    view: V,
}

impl<V: ViewAdapter> Chart<V> {
    pub fn new(dataset: Dataset, config: &EngineConfig, view: V) -> Self {
        let series = SeriesIndex::build(&dataset);
        info!(
            "chart ready: {} records, {} series, {:?} scale",
            dataset.len(),
            series.len(),
            config.scale_mode
        );

        let mut chart = Chart {
            dataset,
            series,
            filter: FilterState::new(config.multi_select),
            interaction: Interaction::Idle,
            mode: config.scale_mode,
            layout: config.layout(),
            frame: None,
            tooltip_timer: DebounceTimer::new(TOOLTIP_HIDE_DELAY_MS),
            pointer: None,
            now_ms: 0.0,
            view,
        };
        chart.render_filters();
        chart.redraw();
        chart
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn series(&self) -> &SeriesIndex {
        &self.series
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.mode
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Whether a record currently accepts hover and click.
    pub fn is_active(&self, id: &RecordId) -> bool {
        self.dataset
            .get(id)
            .is_some_and(|r| self.filter.is_active(r))
    }

    /// Far-future flag under the current frame.
    pub fn is_far_future(&self, id: &RecordId) -> Option<bool> {
        let index = self.dataset.index_of(id)?;
        self.frame.as_ref().map(|f| f.far_future[index])
    }

    pub fn tooltip_deadline(&self) -> Option<f64> {
        self.tooltip_timer.deadline()
    }

    pub fn tooltip_generation(&self) -> u64 {
        self.tooltip_timer.generation()
    }

    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            interaction: self.interaction.clone(),
            scale_mode: self.mode,
            query: self.filter.query().to_string(),
            mediums: self.filter.active_mediums().map(str::to_string).collect(),
            multi_select: self.filter.multi_select(),
            tooltip_hide_pending: self.tooltip_timer.is_pending(),
        }
    }

    // -------------------------------------------------------------------------
    // Redraw
    // -------------------------------------------------------------------------

    pub fn resize(&mut self, width: f64, height: f64) {
        self.layout = Layout::new(width, height);
        self.redraw();
    }

    /// Switching modes rebuilds the scale from scratch.
    pub fn set_scale_mode(&mut self, mode: ScaleMode) {
        self.mode = mode;
        self.redraw();
    }

    /// Rebuild the frame and restore whatever interaction state was active.
    pub fn redraw(&mut self) {
        if self.layout.is_empty() {
            debug!(
                "skipping redraw of empty {}x{} surface",
                self.layout.width, self.layout.height
            );
            self.frame = None;
            return;
        }

        let frame = Frame::build(&self.dataset, self.mode, &self.layout);
        let axis = AxisView::build(&frame.scale, &frame.geometry, self.layout.left());
        self.frame = Some(frame);
        self.view.render_axis(&axis);
        self.restore_interaction();
    }

    /// Re-render everything that depends on the interaction state: arcs, overlay,
    /// sidebar, and the tooltip of a hovered non-selected arc. Labels are rebuilt
    /// against the current frame. A focal record that no longer exists drops the
    /// chart back to idle.
    fn restore_interaction(&mut self) {
        let focal = self
            .interaction
            .focal()
            .map(|(id, selected)| (id.clone(), selected));

        match focal {
            Some((id, selected)) => match self.dataset.index_of(&id) {
                Some(index) => {
                    self.render_highlight(index, selected);
                    self.apply(Effect::ShowSidebar(id));
                    if let Interaction::HoveringOther { hovered, .. } = &self.interaction {
                        let hovered = hovered.clone();
                        self.apply(Effect::ShowTooltip(hovered));
                    }
                }
                None => {
                    warn!("focal record {} vanished across redraw; clearing", id);
                    self.interaction = Interaction::Idle;
                    self.tooltip_timer.cancel();
                    self.view.hide_tooltip();
                    self.view.clear_sidebar();
                    self.render_filter_view();
                }
            },
            None => self.render_filter_view(),
        }
    }

    // -------------------------------------------------------------------------
    // Filters and search
    // -------------------------------------------------------------------------

    /// Press a medium button (`None` is "All"). Drops any selection first.
    pub fn toggle_medium(&mut self, medium: Option<&str>) {
        self.reset_interaction();
        self.filter.toggle_medium(medium);
        self.render_filters();
        self.render_filter_view();
    }

    pub fn set_multi_select(&mut self, multi_select: bool) {
        self.filter.set_multi_select(multi_select);
        self.render_filters();
    }

    pub fn set_search(&mut self, query: &str) {
        self.reset_interaction();
        self.filter.set_query(query);
        self.render_filter_view();
    }

    pub fn clear_search(&mut self) {
        self.filter.clear_query();
        self.settle_tooltip_hide();
        self.restore_interaction();
    }

    /// Deselect, and drop a bare hover too: the filter view is about to replace it.
    fn reset_interaction(&mut self) {
        self.dispatch(PointerEvent::Deselect);
        if let Interaction::Hovering { .. } = self.interaction {
            self.interaction = Interaction::Idle;
            self.view.clear_sidebar();
        }
        self.settle_tooltip_hide();
    }

    /// Filter and search changes never leave a hide armed. A pending hide means
    /// the tooltip is on its way out, so it goes now.
    fn settle_tooltip_hide(&mut self) {
        if self.tooltip_timer.is_pending() {
            self.tooltip_timer.cancel();
            self.view.hide_tooltip();
        }
    }

    // -------------------------------------------------------------------------
    // Pointer events
    // -------------------------------------------------------------------------

    pub fn pointer_enter(&mut self, id: &RecordId) {
        self.dispatch(PointerEvent::Enter(id.clone()));
    }

    /// Enter with the pointer position carried by the enter event, so the
    /// tooltip's first frame is anchored there and not at the last move.
    pub fn pointer_enter_at(&mut self, id: &RecordId, page: Point) {
        let pointer = match self.pointer {
            Some(pointer) => PointerInfo { page, ..pointer },
            None => PointerInfo {
                page,
                viewport_width: f64::INFINITY,
                tooltip_width: 0.0,
            },
        };
        self.pointer = Some(pointer);
        self.pointer_enter(id);
    }

    pub fn pointer_leave(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        self.dispatch(PointerEvent::Leave);
    }

    pub fn click(&mut self, id: &RecordId) {
        self.dispatch(PointerEvent::Click(id.clone()));
    }

    pub fn click_background(&mut self) {
        self.dispatch(PointerEvent::BackgroundClick);
    }

    /// Pointer over a sibling in the sidebar's series list.
    pub fn preview_enter(&mut self, id: &RecordId) {
        self.dispatch(PointerEvent::PreviewEnter(id.clone()));
    }

    pub fn preview_leave(&mut self) {
        self.dispatch(PointerEvent::PreviewLeave);
    }

    /// Track the pointer so the tooltip follows it while another arc is selected.
    pub fn pointer_move(&mut self, pointer: PointerInfo) {
        self.pointer = Some(pointer);
        if let Interaction::HoveringOther { .. } = self.interaction {
            self.view.move_tooltip(pointer.tooltip_anchor());
        }
    }

    /// Advance the host clock. Returns true when the tooltip was hidden.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.now_ms = now_ms;
        if self.tooltip_timer.poll(now_ms) {
            self.view.hide_tooltip();
            return true;
        }
        false
    }

    /// Host timeout path: fire only if `generation` is still the armed one.
    pub fn fire_tooltip_timer(&mut self, generation: u64) -> bool {
        if self.tooltip_timer.fire(generation) {
            self.view.hide_tooltip();
            return true;
        }
        false
    }

    fn dispatch(&mut self, event: PointerEvent) {
        let target = match &event {
            PointerEvent::Enter(id) | PointerEvent::Click(id) | PointerEvent::PreviewEnter(id) => {
                Some(id)
            }
            _ => None,
        };
        if let Some(id) = target {
            if self.dataset.get(id).is_none() {
                warn!("ignoring {:?} for unknown record", event);
                return;
            }
        }

        let transition = {
            let dataset = &self.dataset;
            let filter = &self.filter;
            selection::transition(&self.interaction, &event, |id| {
                dataset.get(id).is_some_and(|r| filter.is_active(r))
            })
        };
        if transition.next != self.interaction {
            debug!("{:?} -> {:?}", self.interaction, transition.next);
        }
        self.interaction = transition.next;
        for effect in transition.effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Highlight { focal, selected } => {
                if let Some(index) = self.dataset.index_of(&focal) {
                    self.render_highlight(index, selected);
                }
            }
            Effect::ShowSidebar(id) => {
                if let Some(record) = self.dataset.get(&id) {
                    let siblings = self.series.siblings_of(&self.dataset, record);
                    let content = SidebarContent::build(record, &siblings, &self.current_scale());
                    self.view.show_sidebar(&content);
                }
            }
            Effect::ClearSidebar => self.view.clear_sidebar(),
            Effect::RestoreFilterView => self.render_filter_view(),
            Effect::ShowTooltip(id) => {
                if let Some(record) = self.dataset.get(&id) {
                    let tooltip =
                        Tooltip::build(record, &self.current_scale(), self.pointer.as_ref());
                    self.view.show_tooltip(&tooltip);
                }
            }
            Effect::HideTooltip => self.view.hide_tooltip(),
            Effect::ScheduleTooltipHide => {
                self.tooltip_timer.schedule(self.now_ms);
            }
            Effect::CancelTooltipHide => self.tooltip_timer.cancel(),
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// The frame's scale, or a fresh one when nothing has been drawn yet.
    fn current_scale(&self) -> AxisScale {
        match &self.frame {
            Some(frame) => frame.scale,
            None => AxisScale::build(self.mode, &self.layout),
        }
    }

    fn arc_draw(&self, frame: &Frame, index: usize, style: ArcStyle) -> ArcDraw {
        let record = &self.dataset.records()[index];
        ArcDraw {
            id: record.id.clone(),
            d: frame.paths[index].clone(),
            color: medium_color(record.medium()).to_string(),
            style,
            interactive: self.filter.is_active(record),
        }
    }

    fn render_filters(&mut self) {
        let buttons = self.filter.medium_buttons(&self.dataset);
        self.view.render_filters(&buttons);
    }

    /// Resting styles from the filter/search predicate; no overlay.
    fn render_filter_view(&mut self) {
        if let Some(frame) = &self.frame {
            let records = self.dataset.records();
            let arcs: Vec<ArcDraw> = self
                .filter
                .draw_order(&self.dataset)
                .into_iter()
                .map(|i| self.arc_draw(frame, i, self.filter.style(&records[i])))
                .collect();
            self.view.render_arcs(&arcs);
        }
        self.view.clear_overlay();
    }

    fn render_highlight(&mut self, focal: usize, selected: bool) {
        let Some(frame) = &self.frame else {
            return;
        };
        let record = &self.dataset.records()[focal];
        let siblings = self.series.sibling_indices(&self.dataset, record);
        let styles = highlight_styles(self.dataset.len(), focal, &siblings, selected);
        let arcs: Vec<ArcDraw> = highlight_order(self.dataset.len(), focal)
            .into_iter()
            .map(|i| self.arc_draw(frame, i, styles[i]))
            .collect();
        let overlay = Overlay::build(record, &frame.scale, &frame.geometry, selected);

        self.view.render_arcs(&arcs);
        self.view.render_overlay(&overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_STROKE, LOG_MAX, SELECTED_STROKE};
    use crate::dataset::WorkRecord;
    use crate::view::testing::RecordingView;
    use proptest::prelude::*;

    fn config(mode: ScaleMode) -> EngineConfig {
        EngineConfig {
            width: 1200.0,
            height: 700.0,
            scale_mode: mode,
            multi_select: false,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            WorkRecord::new("odyssey", 1968.0, 2001.0)
                .with_medium("film")
                .with_title("2001: A Space Odyssey"),
            WorkRecord::new("dune", 1965.0, 10191.0)
                .with_medium("prose fiction")
                .with_title("Dune")
                .with_series("S1"),
            WorkRecord::new("messiah", 1969.0, 10203.0)
                .with_medium("prose fiction")
                .with_title("Dune Messiah")
                .with_series("S1"),
            WorkRecord::new("children", 1976.0, 10219.0)
                .with_medium("prose fiction")
                .with_title("Children of Dune")
                .with_series("S1"),
            WorkRecord::new("trek", 1966.0, 2266.0)
                .with_medium("television")
                .with_title("Star Trek"),
            WorkRecord::new("deep", 1950.0, 1e15)
                .with_medium("comics")
                .with_title("Deep Time"),
        ])
    }

    fn chart(mode: ScaleMode) -> Chart<RecordingView> {
        Chart::new(dataset(), &config(mode), RecordingView::default())
    }

    fn id(s: &str) -> RecordId {
        RecordId::new(s)
    }

    #[test]
    fn initial_draw_uses_filter_view() {
        let chart = chart(ScaleMode::Linear);
        let view = chart.view();
        assert!(view.axis.is_some());
        assert_eq!(view.arcs.len(), 6);
        let odyssey = view.arc("odyssey").unwrap();
        assert_eq!(odyssey.style, ArcStyle::new(0.22, DEFAULT_STROKE));
        assert!(odyssey.interactive);
        assert_eq!(view.filters[0].label, "All");
    }

    #[test]
    fn selecting_series_member_highlights_siblings() {
        let mut chart = chart(ScaleMode::Linear);
        chart.pointer_enter(&id("dune"));
        chart.click(&id("dune"));

        let view = chart.view();
        assert_eq!(view.top_arc().unwrap().id, id("dune"));
        assert_eq!(
            view.arc("dune").unwrap().style,
            ArcStyle::new(1.0, SELECTED_STROKE)
        );
        assert_eq!(view.arc("messiah").unwrap().style.opacity, 0.50);
        assert_eq!(view.arc("children").unwrap().style.opacity, 0.50);
        for other in ["odyssey", "trek", "deep"] {
            assert_eq!(view.arc(other).unwrap().style.opacity, 0.04);
        }
        assert!(view.overlay.as_ref().unwrap().ring.is_some());
        let sidebar = view.sidebar.as_ref().unwrap();
        assert_eq!(sidebar.series.as_ref().unwrap().items.len(), 2);
    }

    #[test]
    fn hover_then_leave_restores_filter_view() {
        let mut chart = chart(ScaleMode::Linear);
        chart.pointer_enter(&id("trek"));
        assert!(chart.view().sidebar.is_some());
        assert!(chart.view().overlay.as_ref().unwrap().ring.is_none());

        chart.pointer_leave(1000.0);
        assert_eq!(chart.interaction(), &Interaction::Idle);
        assert!(chart.view().sidebar.is_none());
        assert!(chart.view().overlay.is_none());
        assert_eq!(chart.view().arc("trek").unwrap().style.opacity, 0.22);
    }

    #[test]
    fn tooltip_for_other_arc_hides_after_delay() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("odyssey"));
        chart.pointer_enter(&id("trek"));
        assert_eq!(chart.view().tooltip.as_ref().unwrap().title, "Star Trek");
        // Main highlight still belongs to the selection.
        assert_eq!(chart.view().sidebar.as_ref().unwrap().id, id("odyssey"));

        chart.pointer_leave(1000.0);
        assert!(!chart.tick(1100.0));
        assert!(chart.view().tooltip.is_some());
        assert!(chart.tick(1120.0));
        assert!(chart.view().tooltip.is_none());
        assert_eq!(
            chart.interaction(),
            &Interaction::Selected {
                selected: id("odyssey")
            }
        );
    }

    #[test]
    fn moving_between_adjacent_arcs_keeps_tooltip() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("odyssey"));
        chart.pointer_enter(&id("trek"));
        chart.pointer_leave(1000.0);
        chart.pointer_enter(&id("dune"));
        assert!(!chart.tick(1500.0));
        assert_eq!(chart.view().tooltip.as_ref().unwrap().title, "Dune");
    }

    #[test]
    fn deselect_cancels_pending_hide() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("odyssey"));
        chart.pointer_enter(&id("trek"));
        chart.pointer_leave(1000.0);
        let stale = chart.tooltip_generation();
        chart.click_background();
        assert!(chart.tooltip_deadline().is_none());
        assert!(!chart.fire_tooltip_timer(stale));
        assert_eq!(chart.interaction(), &Interaction::Idle);
        assert!(chart.view().sidebar.is_none());
    }

    #[test]
    fn filtered_out_arcs_ignore_pointer() {
        let mut chart = chart(ScaleMode::Linear);
        chart.toggle_medium(Some("film"));
        chart.pointer_enter(&id("trek"));
        chart.click(&id("trek"));
        assert_eq!(chart.interaction(), &Interaction::Idle);

        let trek = chart.view().arc("trek").unwrap();
        assert!(!trek.interactive);
        assert_eq!(trek.style.opacity, 0.03);
        assert_eq!(chart.view().top_arc().unwrap().id, id("odyssey"));
    }

    #[test]
    fn filter_change_drops_selection() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("dune"));
        chart.toggle_medium(Some("film"));
        assert_eq!(chart.interaction(), &Interaction::Idle);
        assert!(chart.view().sidebar.is_none());
        assert!(chart.view().filters[1..].iter().any(|b| b.active));
    }

    #[test]
    fn search_boosts_matches() {
        let mut chart = chart(ScaleMode::Linear);
        chart.set_search("DUNE");
        let dune = chart.view().arc("dune").unwrap();
        assert!((dune.style.opacity - 0.616).abs() < 1e-9);
        assert_eq!(chart.view().arc("odyssey").unwrap().style.opacity, 0.03);

        chart.clear_search();
        assert_eq!(chart.view().arc("odyssey").unwrap().style.opacity, 0.22);
    }

    #[test]
    fn scale_switch_restores_selection() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("deep"));
        assert_eq!(chart.is_far_future(&id("deep")), Some(true));
        assert_eq!(chart.is_far_future(&id("dune")), Some(true));

        chart.set_scale_mode(ScaleMode::Log);
        assert_eq!(chart.is_far_future(&id("dune")), Some(false));
        assert_eq!(chart.is_far_future(&id("deep")), Some(true));

        let view = chart.view();
        assert_eq!(view.top_arc().unwrap().id, id("deep"));
        let overlay = view.overlay.as_ref().unwrap();
        let scale = chart.frame().unwrap().scale;
        assert_eq!(overlay.endpoints[1].x, scale.scale(LOG_MAX));
        assert_eq!(overlay.endpoints[1].label, "> 10T");
        assert!(overlay.ring.is_some());
    }

    #[test]
    fn scale_switch_rebuilds_sidebar_labels() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("dune"));
        let sidebar = chart.view().sidebar.as_ref().unwrap();
        assert_eq!(sidebar.timeline.set_label, "> 3000");
        assert_eq!(sidebar.series.as_ref().unwrap().items[0].years, "1,969 → > 3000");

        chart.set_scale_mode(ScaleMode::Log);
        let view = chart.view();
        let sidebar = view.sidebar.as_ref().unwrap();
        assert_eq!(sidebar.id, id("dune"));
        assert_eq!(sidebar.timeline.set_label, "10,191");
        assert_eq!(sidebar.series.as_ref().unwrap().items[0].years, "1,969 → 10,203");
        assert_eq!(
            view.overlay.as_ref().unwrap().endpoints[1].label,
            sidebar.timeline.set_label
        );
    }

    #[test]
    fn scale_switch_rebuilds_hover_tooltip() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("odyssey"));
        chart.pointer_enter(&id("dune"));
        assert_eq!(chart.view().tooltip.as_ref().unwrap().years, "1,965 → > 3000");

        chart.set_scale_mode(ScaleMode::Log);
        let tooltip = chart.view().tooltip.as_ref().unwrap();
        assert_eq!(tooltip.id, id("dune"));
        assert_eq!(tooltip.years, "1,965 → 10,191");
        assert_eq!(chart.view().sidebar.as_ref().unwrap().id, id("odyssey"));
    }

    #[test]
    fn filter_change_cancels_pending_hide() {
        let mut chart = chart(ScaleMode::Linear);
        chart.pointer_enter(&id("trek"));
        chart.pointer_leave(1000.0);
        assert!(chart.snapshot().tooltip_hide_pending);

        chart.toggle_medium(Some("film"));
        assert!(!chart.snapshot().tooltip_hide_pending);
        assert!(!chart.tick(2000.0));
    }

    #[test]
    fn search_changes_cancel_pending_hide() {
        let mut chart = chart(ScaleMode::Linear);
        chart.pointer_enter(&id("trek"));
        chart.pointer_leave(1000.0);
        chart.set_search("star");
        assert!(!chart.snapshot().tooltip_hide_pending);

        chart.pointer_enter(&id("trek"));
        chart.pointer_leave(3000.0);
        assert!(chart.snapshot().tooltip_hide_pending);
        chart.clear_search();
        assert!(!chart.snapshot().tooltip_hide_pending);
        assert!(!chart.tick(4000.0));
    }

    #[test]
    fn clear_search_hides_tooltip_that_was_leaving() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("odyssey"));
        chart.set_search("e");
        chart.click(&id("odyssey"));
        chart.pointer_enter(&id("trek"));
        chart.pointer_leave(1000.0);
        assert!(chart.view().tooltip.is_some());

        chart.clear_search();
        assert!(chart.view().tooltip.is_none());
        assert_eq!(
            chart.interaction(),
            &Interaction::Selected {
                selected: id("odyssey")
            }
        );
    }

    #[test]
    fn enter_with_position_anchors_first_tooltip_frame() {
        let mut chart = chart(ScaleMode::Linear);
        chart.pointer_move(PointerInfo {
            page: Point::new(10.0, 10.0),
            viewport_width: 1400.0,
            tooltip_width: 180.0,
        });
        chart.click(&id("odyssey"));
        chart.pointer_enter_at(&id("trek"), Point::new(300.0, 400.0));
        assert_eq!(
            chart.view().tooltip.as_ref().unwrap().anchor,
            Some(Point::new(314.0, 356.0))
        );
    }

    #[test]
    fn enter_with_position_before_any_move() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("odyssey"));
        chart.pointer_enter_at(&id("trek"), Point::new(300.0, 20.0));
        assert_eq!(
            chart.view().tooltip.as_ref().unwrap().anchor,
            Some(Point::new(314.0, 8.0))
        );
    }

    #[test]
    fn resize_to_zero_skips_and_recovers() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("odyssey"));
        chart.resize(0.0, 0.0);
        assert!(chart.frame().is_none());
        chart.resize(900.0, 500.0);
        assert!(chart.frame().is_some());
        assert_eq!(chart.view().top_arc().unwrap().id, id("odyssey"));
    }

    #[test]
    fn preview_sibling_then_restore() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("dune"));
        chart.preview_enter(&id("messiah"));
        assert_eq!(chart.view().top_arc().unwrap().id, id("messiah"));
        assert!(chart.view().tooltip.is_some());

        chart.preview_leave();
        assert_eq!(chart.view().top_arc().unwrap().id, id("dune"));
        assert!(chart.view().tooltip.is_none());
        assert!(chart.view().overlay.as_ref().unwrap().ring.is_some());
    }

    #[test]
    fn unknown_record_is_ignored() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("missing"));
        assert_eq!(chart.interaction(), &Interaction::Idle);
    }

    #[test]
    fn pointer_move_repositions_tooltip_only_when_hovering_other() {
        let mut chart = chart(ScaleMode::Linear);
        let pointer = PointerInfo {
            page: crate::types::Point::new(100.0, 200.0),
            viewport_width: 1400.0,
            tooltip_width: 180.0,
        };
        chart.pointer_move(pointer);
        assert!(chart.view().tooltip_anchor.is_none());

        chart.click(&id("odyssey"));
        chart.pointer_enter(&id("trek"));
        chart.pointer_move(pointer);
        assert_eq!(
            chart.view().tooltip_anchor,
            Some(crate::types::Point::new(114.0, 156.0))
        );
    }

    #[test]
    fn highlight_twice_is_idempotent() {
        let mut chart = chart(ScaleMode::Linear);
        chart.click(&id("dune"));
        let first = chart.view().arcs.clone();
        chart.preview_leave();
        assert_eq!(chart.view().arcs, first);
    }

    proptest! {
        #[test]
        fn repeated_highlight_draws_same_arcs(focal in 0usize..6, selected in any::<bool>()) {
            let mut chart = chart(ScaleMode::Linear);
            let record = chart.dataset().records()[focal].id.clone();
            if selected {
                chart.click(&record);
            } else {
                chart.pointer_enter(&record);
            }
            let first = chart.view().arcs.clone();
            let first_overlay = chart.view().overlay.clone();

            chart.resize(1200.0, 700.0);
            prop_assert_eq!(&chart.view().arcs, &first);
            prop_assert_eq!(&chart.view().overlay, &first_overlay);
            prop_assert_eq!(chart.view().top_arc().map(|a| a.id.clone()), Some(record));
        }
    }
}
