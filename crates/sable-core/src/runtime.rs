use std::collections::VecDeque;

use crate::{Semantics, View, ViewId, semantics::Role};

/// Frame: output of building the view tree for a tick.
pub struct Frame {
    pub index: u64,
    pub root: View,
    pub semantics_nodes: Vec<SemNode>,
}

/// Flattened semantics node, the source of truth for accessibility backends.
#[derive(Clone, Debug, PartialEq)]
pub struct SemNode {
    /// Stable id, shared with the associated `View`.
    pub id: ViewId,
    pub role: Role,
    pub label: Option<String>,
    pub focused: bool,
    pub enabled: bool,
    pub expanded: Option<bool>,
    pub selected: Option<bool>,
}

impl SemNode {
    fn from_view(id: ViewId, s: &Semantics, focused: Option<ViewId>) -> Self {
        Self {
            id,
            role: s.role,
            label: s.label.clone(),
            focused: s.focused || (id != 0 && focused == Some(id)),
            enabled: s.enabled,
            expanded: s.expanded,
            selected: s.selected,
        }
    }
}

/// Per-window bookkeeping: id allocation, focus, and the after-paint queue.
pub struct Scheduler {
    next_id: ViewId,
    frame_index: u64,
    pub focused: Option<ViewId>,
    after_paint: VecDeque<Box<dyn FnOnce()>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            frame_index: 0,
            focused: None,
            after_paint: VecDeque::new(),
        }
    }

    pub fn id(&mut self) -> ViewId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn defer_after_paint(&mut self, f: Box<dyn FnOnce()>) {
        self.after_paint.push_back(f);
    }

    pub fn pending_after_paint(&self) -> usize {
        self.after_paint.len()
    }

    /// Drains the callbacks queued so far. Callbacks queued while these run
    /// wait for the following frame.
    pub fn take_after_paint(&mut self) -> Vec<Box<dyn FnOnce()>> {
        self.after_paint.drain(..).collect()
    }

    pub fn frame(&mut self, root: View) -> Frame {
        self.frame_index += 1;
        let focused = self.focused;
        let mut semantics_nodes = Vec::new();
        root.walk(&mut |v| {
            if let Some(s) = &v.semantics {
                semantics_nodes.push(SemNode::from_view(v.id, s, focused));
            }
        });
        Frame {
            index: self.frame_index,
            root,
            semantics_nodes,
        }
    }
}
