use crate::Rect;
use std::rc::Rc;

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;

#[derive(Clone)]
pub enum ViewKind {
    Column,
    Text {
        text: String,
    },
    Button {
        text: String,
        on_click: Option<Callback>,
    },
    SearchField {
        query: String,
        /// Caret position as a byte offset into `query`.
        caret: usize,
        hint: String,
    },
    /// Floating list surface. `rect` is in page coordinates.
    ListBox {
        rect: Rect,
        scroll_offset: f32,
        visible: bool,
    },
    OptionRow {
        text: String,
        index: usize,
        highlighted: bool,
        selected: bool,
    },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Text { text } => f.debug_struct("Text").field("text", text).finish(),
            ViewKind::Button { text, .. } => f
                .debug_struct("Button")
                .field("text", text)
                .field("on_click", &"<callback>")
                .finish(),
            ViewKind::SearchField { query, caret, hint } => f
                .debug_struct("SearchField")
                .field("query", query)
                .field("caret", caret)
                .field("hint", hint)
                .finish(),
            ViewKind::ListBox {
                rect,
                scroll_offset,
                visible,
            } => f
                .debug_struct("ListBox")
                .field("rect", rect)
                .field("scroll_offset", scroll_offset)
                .field("visible", visible)
                .finish(),
            ViewKind::OptionRow {
                text,
                index,
                highlighted,
                selected,
            } => f
                .debug_struct("OptionRow")
                .field("text", text)
                .field("index", index)
                .field("highlighted", highlighted)
                .field("selected", selected)
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub children: Vec<View>,
    pub semantics: Option<crate::semantics::Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            children: vec![],
            semantics: None,
        }
    }
    pub fn with_id(mut self, id: ViewId) -> Self {
        self.id = id;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn semantics(mut self, s: crate::semantics::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }

    /// Depth-first, pre-order.
    pub fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a View)) {
        f(self);
        for c in &self.children {
            c.walk(f);
        }
    }

    pub fn find(&self, pred: impl Fn(&View) -> bool) -> Option<&View> {
        let mut found = None;
        self.walk(&mut |v| {
            if found.is_none() && pred(v) {
                found = Some(v);
            }
        });
        found
    }
}
