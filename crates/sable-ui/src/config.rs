//! Selector tuning knobs.
//!
//! A `SelectorConfig` is resolved once per mount. Hosts either pass one
//! explicitly or provide defaults for a whole subtree:
//!
//! ```rust
//! use sable_ui::config::*;
//!
//! let cfg = SelectorConfig {
//!     page_size: 5,
//!     on_scroll: ViewportPolicy::Reposition,
//!     ..Default::default()
//! };
//! with_selector_config(cfg, || {
//!     assert_eq!(SelectorConfig::current().page_size, 5);
//! });
//! assert_eq!(SelectorConfig::current().page_size, 10);
//! ```

use sable_core::*;
use web_time::Duration;

use crate::positioner::PanelMetrics;

/// What an open panel does when the page scrolls or the window resizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewportPolicy {
    /// Close the panel.
    #[default]
    Dismiss,
    /// Recompute the panel rect from the anchor's new bounds and stay open.
    Reposition,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    /// Rows skipped by PageUp / PageDown.
    pub page_size: usize,
    pub on_scroll: ViewportPolicy,
    pub on_resize: ViewportPolicy,
    /// Shows a query field in the panel that filters the options.
    pub searchable: bool,
    /// dp
    pub row_height: f32,
    pub max_visible_rows: usize,
    /// dp
    pub panel_padding: f32,
    /// dp; only used when `searchable`.
    pub search_height: f32,
    /// Duration of keyboard-driven list scrolling. Zero snaps.
    pub scroll_animation_ms: u64,
    pub search_hint: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            on_scroll: ViewportPolicy::Dismiss,
            on_resize: ViewportPolicy::Dismiss,
            searchable: false,
            row_height: 28.0,
            max_visible_rows: 8,
            panel_padding: 4.0,
            search_height: 32.0,
            scroll_animation_ms: 150,
            search_hint: "Search".into(),
        }
    }
}

impl SelectorConfig {
    /// Innermost config provided with [`with_selector_config`], or the defaults.
    pub fn current() -> Self {
        local::<SelectorConfig>().unwrap_or_default()
    }

    pub fn metrics(&self) -> PanelMetrics {
        PanelMetrics {
            row_height: self.row_height,
            max_visible_rows: self.max_visible_rows.max(1),
            padding: self.panel_padding,
            search_height: if self.searchable {
                self.search_height
            } else {
                0.0
            },
        }
    }

    pub fn scroll_animation(&self) -> AnimationSpec {
        if self.scroll_animation_ms == 0 {
            AnimationSpec::instant()
        } else {
            AnimationSpec::tween(
                Duration::from_millis(self.scroll_animation_ms),
                Easing::EaseOut,
            )
        }
    }
}

/// Makes `config` the default for selectors mounted inside `f`.
pub fn with_selector_config<R>(config: SelectorConfig, f: impl FnOnce() -> R) -> R {
    with_local(config, f)
}
