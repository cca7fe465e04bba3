/// High‑level semantic role of a view, similar to ARIA roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Text,
    Button,
    TextField,
    Container,
    ComboBox,
    ListBox,
    Option,
}

/// Semantics attached to a `View`, used to build the accessibility tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Semantics {
    /// Primary role of this node (what kind of thing it is).
    pub role: Role,
    /// Human‑readable label for screen readers.
    pub label: Option<String>,
    /// Whether this node is currently focused.
    pub focused: bool,
    /// Whether this node is actionable; disabled nodes remain in the tree
    /// but are marked not enabled.
    pub enabled: bool,
    /// Popup state for combobox-like nodes (`aria-expanded`).
    pub expanded: Option<bool>,
    /// Selection state for options (`aria-selected`).
    pub selected: Option<bool>,
    /// Position of the active option within its list (`aria-activedescendant`).
    pub active_descendant: Option<usize>,
}

impl Semantics {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            focused: false,
            enabled: true,
            expanded: None,
            selected: None,
            active_descendant: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn active_descendant(mut self, index: Option<usize>) -> Self {
        self.active_descendant = index;
        self
    }
}
