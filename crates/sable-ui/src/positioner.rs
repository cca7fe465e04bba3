//! # Panel placement
//!
//! The floating panel sits directly below its anchor and matches its width.
//! Anchor boxes come from the host in viewport coordinates; the panel rect is
//! kept in page coordinates (viewport + scroll offset), so it stays aligned
//! with the anchor as long as the page does not scroll.
//!
//! ```rust
//! use sable_core::*;
//! use sable_ui::positioner::compute_rect;
//!
//! let anchor = Rect::new(40.0, 100.0, 200.0, 32.0);
//! let panel = compute_rect(anchor, 0.0, 250.0);
//! assert_eq!(panel.top(), 382.0);
//! assert_eq!(panel.left(), 40.0);
//! assert_eq!(panel.w, 200.0);
//! ```
//!
//! Recomputation is event-driven: the selector calls [`Positioner::place`] when
//! it opens and when its viewport policy asks for a reposition. Nothing polls.

use sable_core::*;

/// `top = anchor.bottom + scroll_y`, `left = anchor.left + scroll_x`,
/// `width = anchor.width`. Height is left at zero; callers size it from
/// [`PanelMetrics`].
pub fn compute_rect(anchor: Rect, scroll_x: f32, scroll_y: f32) -> Rect {
    Rect {
        x: anchor.left() + scroll_x,
        y: anchor.bottom() + scroll_y,
        w: anchor.w,
        h: 0.0,
    }
}

/// Row and chrome sizes of the panel, in dp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelMetrics {
    pub row_height: f32,
    pub max_visible_rows: usize,
    pub padding: f32,
    /// Height of the search field strip; zero when the selector is not searchable.
    pub search_height: f32,
}

impl Default for PanelMetrics {
    fn default() -> Self {
        Self {
            row_height: 28.0,
            max_visible_rows: 8,
            padding: 4.0,
            search_height: 0.0,
        }
    }
}

impl PanelMetrics {
    pub fn row_px(&self) -> f32 {
        dp_to_px(self.row_height)
    }

    /// Height of the scrollable option list for `rows` options.
    pub fn viewport_height(&self, rows: usize) -> f32 {
        rows.min(self.max_visible_rows) as f32 * self.row_px()
    }

    pub fn content_height(&self, rows: usize) -> f32 {
        rows as f32 * self.row_px()
    }

    pub fn panel_height(&self, rows: usize) -> f32 {
        self.viewport_height(rows) + dp_to_px(self.search_height) + 2.0 * dp_to_px(self.padding)
    }

    /// Offset from the panel's top edge to the first row.
    pub fn list_inset(&self) -> f32 {
        dp_to_px(self.padding) + dp_to_px(self.search_height)
    }
}

#[derive(Debug, Default)]
pub struct Positioner {
    metrics: PanelMetrics,
    last: Option<Rect>,
}

impl Positioner {
    pub fn new(metrics: PanelMetrics) -> Self {
        Self {
            metrics,
            last: None,
        }
    }

    pub fn metrics(&self) -> &PanelMetrics {
        &self.metrics
    }

    /// Computes and remembers the panel rect for `rows` visible options.
    pub fn place(&mut self, anchor: Rect, scroll: Vec2, rows: usize) -> Rect {
        let rect =
            compute_rect(anchor, scroll.x, scroll.y).with_height(self.metrics.panel_height(rows));
        log::trace!("panel placed at {rect:?} for {rows} rows");
        self.last = Some(rect);
        rect
    }

    pub fn last(&self) -> Option<Rect> {
        self.last
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Panel rect in viewport coordinates, if placed.
    pub fn viewport_rect(&self, scroll: Vec2) -> Option<Rect> {
        self.last.map(|r| r.translate(-scroll.x, -scroll.y))
    }

    pub fn contains(&self, point: Vec2, scroll: Vec2) -> bool {
        self.viewport_rect(scroll).is_some_and(|r| r.contains(point))
    }

    /// Visible row under a viewport `point`, given the list's scroll offset.
    pub fn row_at(&self, point: Vec2, scroll: Vec2, list_offset: f32, rows: usize) -> Option<usize> {
        let panel = self.viewport_rect(scroll)?;
        if !panel.contains(point) {
            return None;
        }
        let list_top = panel.y + self.metrics.list_inset();
        let list_bottom = list_top + self.metrics.viewport_height(rows);
        if point.y < list_top || point.y >= list_bottom {
            return None;
        }
        let idx = ((point.y - list_top + list_offset) / self.metrics.row_px()).floor() as usize;
        (idx < rows).then_some(idx)
    }
}
