//! # Panel list scrolling
//!
//! The option list inside an open panel scrolls independently of the page.
//! `ListScroll` stores viewport and content heights plus an animated offset.
//!
//! Two kinds of motion exist:
//!
//! - user scrolling (wheel over the panel) consumes a delta immediately and
//!   returns the leftover, like any nested scroll container;
//! - keyboard traversal calls [`ListScroll::ensure_visible`], which moves the
//!   list the minimum distance needed to reveal a row (nearest edge) and
//!   animates there.
//!
//! The host advances animations with [`ListScroll::tick`] once per frame.

use sable_core::*;

pub struct ListScroll {
    offset: AnimatedValue<f32>,
    viewport_height: f32,
    content_height: f32,
}

impl Default for ListScroll {
    fn default() -> Self {
        Self::new(AnimationSpec::fast())
    }
}

impl ListScroll {
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            offset: AnimatedValue::new(0.0, spec),
            viewport_height: 0.0,
            content_height: 0.0,
        }
    }

    pub fn set_extent(&mut self, viewport_height: f32, content_height: f32) {
        self.viewport_height = viewport_height.max(0.0);
        self.content_height = content_height.max(0.0);
        self.clamp_offset();
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    fn clamp_offset(&mut self) {
        let max_off = self.max_offset();
        let target = *self.offset.target();
        if target > max_off || *self.offset.get() > max_off {
            self.offset.snap_to(target.clamp(0.0, max_off));
        }
    }

    /// Current (possibly mid-animation) offset in px.
    pub fn offset(&self) -> f32 {
        *self.offset.get()
    }

    /// Where the list is heading.
    pub fn target(&self) -> f32 {
        *self.offset.target()
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }

    pub fn reset(&mut self) {
        self.offset.snap_to(0.0);
    }

    /// Scrolls the minimum distance so that `[top, bottom)` (content
    /// coordinates) is inside the viewport. Returns whether a scroll was
    /// started.
    pub fn ensure_visible(&mut self, top: f32, bottom: f32, smooth: bool) -> bool {
        let current = self.target();
        let vh = self.viewport_height;
        let wanted = if top < current {
            top
        } else if bottom > current + vh {
            bottom - vh
        } else {
            return false;
        };
        let wanted = wanted.clamp(0.0, self.max_offset());
        if (wanted - current).abs() < f32::EPSILON {
            return false;
        }
        if smooth {
            self.offset.set_target(wanted);
        } else {
            self.offset.snap_to(wanted);
        }
        true
    }

    /// Consume dy (pixels), clamp to bounds, return leftover.
    pub fn scroll_immediate(&mut self, dy: f32) -> f32 {
        let before = self.offset();
        let new_off = (before + dy).clamp(0.0, self.max_offset());
        self.offset.snap_to(new_off);
        dy - (new_off - before)
    }

    /// Advance animation one tick; returns true if still animating.
    pub fn tick(&mut self) -> bool {
        self.offset.update()
    }
}
