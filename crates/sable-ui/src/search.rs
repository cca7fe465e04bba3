//! Query editing and option filtering for searchable selectors.

use sable_core::*;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// find prev/next grapheme boundaries around a byte index
fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn next_grapheme_boundary(text: &str, byte: usize) -> usize {
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return i;
        }
    }
    text.len()
}

/// Single-line query editor. `selection` holds byte offsets on grapheme
/// boundaries; an empty range is the caret.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub text: String,
    pub selection: Range<usize>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.selection = 0..0;
    }

    pub fn insert_text(&mut self, text: &str) {
        let start = self.selection.start.min(self.text.len());
        let end = self.selection.end.min(self.text.len());

        self.text.replace_range(start..end, text);
        let new_pos = start + text.len();
        self.selection = new_pos..new_pos;
    }

    pub fn delete_backward(&mut self) {
        if self.selection.start == self.selection.end {
            let pos = self.selection.start.min(self.text.len());
            if pos > 0 {
                let prev = prev_grapheme_boundary(&self.text, pos);
                self.text.replace_range(prev..pos, "");
                self.selection = prev..prev;
            }
        } else {
            self.insert_text("");
        }
    }

    pub fn delete_forward(&mut self) {
        if self.selection.start == self.selection.end {
            let pos = self.selection.start.min(self.text.len());
            if pos < self.text.len() {
                let next = next_grapheme_boundary(&self.text, pos);
                self.text.replace_range(pos..next, "");
            }
        } else {
            self.insert_text("");
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let mut pos = self.selection.end.min(self.text.len());
        if delta < 0 {
            for _ in 0..delta.unsigned_abs() {
                pos = prev_grapheme_boundary(&self.text, pos);
            }
        } else if delta > 0 {
            for _ in 0..(delta as usize) {
                pos = next_grapheme_boundary(&self.text, pos);
            }
        }
        self.selection = pos..pos;
    }

    pub fn caret_index(&self) -> usize {
        self.selection.end
    }

    /// Applies an editing key. Returns `Some(changed)` when the key was an
    /// editing key (text changed or caret moved), `None` otherwise.
    pub fn handle_key(&mut self, ev: &KeyEvent) -> Option<bool> {
        let old = self.text.clone();
        match &ev.key {
            Key::Character(c) if !ev.modifiers.is_command() => {
                let mut buf = [0u8; 4];
                self.insert_text(c.encode_utf8(&mut buf));
            }
            Key::Space if !ev.modifiers.is_command() => self.insert_text(" "),
            Key::Backspace => self.delete_backward(),
            Key::Delete => self.delete_forward(),
            Key::ArrowLeft => self.move_cursor(-1),
            Key::ArrowRight => self.move_cursor(1),
            _ => return None,
        }
        Some(self.text != old)
    }
}

/// Case-insensitive substring match. An empty query matches everything.
pub fn matches(option: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    option.to_lowercase().contains(&query.to_lowercase())
}

/// Source indices of the options that match `query`, in display order.
pub fn filter_options(options: &[String], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }
    let q = query.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, o)| o.to_lowercase().contains(&q))
        .map(|(i, _)| i)
        .collect()
}

#[allow(non_snake_case)]
pub fn SearchField(state: &SearchState, hint: impl Into<String>) -> View {
    View::new(
        0,
        ViewKind::SearchField {
            query: state.text.clone(),
            caret: state.caret_index(),
            hint: hint.into(),
        },
    )
    .semantics(Semantics::new(Role::TextField))
}
