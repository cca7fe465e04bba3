#![allow(non_snake_case)]
//! Widgets for Sable: the [`Selector`](selector::Selector) combobox, its
//! floating panel, and the small view builders they render with.
//!
//! ```rust
//! use sable_ui::*;
//!
//! let row = OptionRow("Deutsch", 2, true, false);
//! let sem = row.semantics.as_ref().unwrap();
//! assert_eq!(sem.role, sable_core::Role::Option);
//! assert_eq!(sem.label.as_deref(), Some("Deutsch"));
//! ```

pub mod config;
pub mod positioner;
pub mod scroll;
pub mod search;
pub mod selector;

use std::rc::Rc;

use sable_core::*;

pub use config::{SelectorConfig, ViewportPolicy, with_selector_config};
pub use search::{SearchField, SearchState};
pub use selector::{
    Direction, OptionSet, Selector, SelectorProps, WidgetState, option_set, step_highlight,
};

pub fn Column() -> View {
    View::new(0, ViewKind::Column)
}

pub fn Text(text: impl Into<String>) -> View {
    let text = text.into();
    View::new(0, ViewKind::Text { text: text.clone() }).semantics(Semantics::new(Role::Text).label(text))
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    let text = text.into();
    View::new(
        0,
        ViewKind::Button {
            text: text.clone(),
            on_click: Some(Rc::new(on_click)),
        },
    )
    .semantics(Semantics::new(Role::Button).label(text))
}

/// Floating list surface; `rect` in page coordinates.
pub fn ListBox(rect: Rect, scroll_offset: f32, visible: bool) -> View {
    View::new(
        0,
        ViewKind::ListBox {
            rect,
            scroll_offset,
            visible,
        },
    )
    .semantics(Semantics::new(Role::ListBox))
}

pub fn OptionRow(text: impl Into<String>, index: usize, highlighted: bool, selected: bool) -> View {
    let text = text.into();
    View::new(
        0,
        ViewKind::OptionRow {
            text: text.clone(),
            index,
            highlighted,
            selected,
        },
    )
    .semantics(Semantics::new(Role::Option).label(text).selected(selected))
}
