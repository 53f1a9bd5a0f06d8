// View adapter: the only way the engine reaches the rendering surface.
// The host owns the canvas/SVG/DOM; the engine hands it descriptors in draw order.

use crate::filter::MediumButton;
use crate::present::{AxisView, Overlay, SidebarContent, Tooltip};
use crate::types::{ArcDraw, Point};

/// Capabilities the host provides. Calls are fire-and-forget; a host that fails
/// to draw something just shows less.
pub trait ViewAdapter {
    fn render_axis(&mut self, axis: &AxisView);

    /// Full arc layer, bottom-most first.
    fn render_arcs(&mut self, arcs: &[ArcDraw]);

    fn render_overlay(&mut self, overlay: &Overlay);

    fn clear_overlay(&mut self);

    fn show_sidebar(&mut self, content: &SidebarContent);

    fn clear_sidebar(&mut self);

    fn show_tooltip(&mut self, tooltip: &Tooltip);

    fn move_tooltip(&mut self, anchor: Point);

    fn hide_tooltip(&mut self);

    fn render_filters(&mut self, buttons: &[MediumButton]);
}
