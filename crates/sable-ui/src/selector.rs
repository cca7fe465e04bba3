//! # Selector
//!
//! A combobox: an always visible anchor button plus a floating panel listing
//! options. The panel opens below the anchor, is traversed with the keyboard
//! or pointer, and commits a value with [`Selector::select`].
//!
//! ## States
//!
//! ```text
//!            open()                 select(i) ─ emits changed(v) if v != value
//!  Closed ───────────▶ Open ─────────────────────────────▶ Closed
//!    ▲                  │ ▲
//!    │    close()       │ │ move_highlight(dir)
//!    └──────────────────┘ └──────┘
//! ```
//!
//! `highlighted` is the only source of truth for the active row; [`Selector::view`]
//! derives row emphasis from it every frame.
//!
//! ## Listeners
//!
//! The selector never keeps a bare listener id. Every registration is a
//! [`ListenerHandle`] stored in the instance:
//!
//! - key and pointer routing are registered once per mount;
//! - page scroll and window resize are registered when the panel opens (at
//!   most one of each) and released on close.
//!
//! `unmount()` releases everything, and dropping the last `Selector` clone
//! does the same. Hosts that refuse a registration get a selector that
//! simply does not react to that signal.
//!
//! ## Values
//!
//! The selector is controlled: it never writes its own `value`. Hosts listen
//! with [`Selector::on_change`] and push the new value back with
//! [`Selector::set_value`], or let [`Selector::bind_value`] do both.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sable_core::*;

use crate::config::{SelectorConfig, ViewportPolicy};
use crate::positioner::Positioner;
use crate::scroll::ListScroll;
use crate::search::{SearchField, SearchState, filter_options};
use crate::{Button, Column, ListBox, OptionRow};

/// Host supplied options in display order. Replacing the `Rc` (not mutating
/// through it) is how a host signals a new option set.
pub type OptionSet = Rc<[String]>;

pub fn option_set<I, S>(items: I) -> OptionSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
    First,
    Last,
    PageForward,
    PageBackward,
}

/// Highlight arithmetic over `len` rows.
///
/// `Next`/`Prev` wrap; page jumps clamp. From no highlight, `Next` lands on
/// the first row, `Prev` on the last, and page jumps count from row 0.
pub fn step_highlight(
    current: Option<usize>,
    direction: Direction,
    len: usize,
    page_size: usize,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    let page = page_size.max(1);
    let next = match (direction, current) {
        (Direction::Next, None) => 0,
        (Direction::Next, Some(i)) if i >= last => 0,
        (Direction::Next, Some(i)) => i + 1,
        (Direction::Prev, None) | (Direction::Prev, Some(0)) => last,
        (Direction::Prev, Some(i)) => (i - 1).min(last),
        (Direction::First, _) => 0,
        (Direction::Last, _) => last,
        (Direction::PageForward, c) => c.unwrap_or(0).saturating_add(page).min(last),
        (Direction::PageBackward, c) => c.unwrap_or(0).min(last).saturating_sub(page),
    };
    Some(next)
}

/// Snapshot of the selector's state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidgetState {
    pub is_open: bool,
    /// Index into the visible options. Kept across close so reopening can
    /// resume, but never rendered while closed.
    pub highlighted: Option<usize>,
    /// Viewport coordinates, as of the last placement.
    pub anchor_rect: Rect,
    /// Page coordinates. Only meaningful while open.
    pub panel_rect: Rect,
    pub disabled: bool,
    /// The panel subtree has been built since the option set last changed.
    pub has_rendered: bool,
}

/// Initial host inputs.
#[derive(Clone, Debug)]
pub struct SelectorProps {
    pub label: String,
    pub options: OptionSet,
    pub value: String,
    pub disabled: bool,
}

impl Default for SelectorProps {
    fn default() -> Self {
        Self {
            label: String::new(),
            options: Rc::from(Vec::<String>::new()),
            value: String::new(),
            disabled: false,
        }
    }
}

struct Props {
    label: String,
    options: OptionSet,
    /// Source indices of the options passing the current query.
    visible: Vec<usize>,
    value: String,
}

#[derive(Default)]
struct Listeners {
    keys: Option<ListenerHandle>,
    pointer: Option<ListenerHandle>,
    scroll: Option<ListenerHandle>,
    resize: Option<ListenerHandle>,
}

struct Inner {
    host: Rc<dyn Host>,
    anchor: ViewId,
    panel: ViewId,
    config: SelectorConfig,
    mounted: Cell<bool>,
    focus_pending: Cell<bool>,
    state: RefCell<WidgetState>,
    props: RefCell<Props>,
    positioner: RefCell<Positioner>,
    list: RefCell<ListScroll>,
    search: RefCell<SearchState>,
    listeners: RefCell<Listeners>,
    on_change: RefCell<Option<Rc<dyn Fn(&str)>>>,
    binding: RefCell<Option<Dispose>>,
    scope: Scope,
}

/// Handle to a mounted selector. Clones share the instance.
#[derive(Clone)]
pub struct Selector {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("anchor", &self.inner.anchor)
            .field("panel", &self.inner.panel)
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl Selector {
    /// Mounts a selector whose anchor is laid out as `anchor`, using the
    /// ambient [`SelectorConfig`].
    pub fn mount(host: Rc<dyn Host>, anchor: ViewId, props: SelectorProps) -> Self {
        Self::mount_with(host, anchor, props, SelectorConfig::current())
    }

    pub fn mount_with(
        host: Rc<dyn Host>,
        anchor: ViewId,
        props: SelectorProps,
        config: SelectorConfig,
    ) -> Self {
        let panel = host.next_id();
        let visible = filter_options(&props.options, "");
        let inner = Rc::new(Inner {
            anchor,
            panel,
            mounted: Cell::new(true),
            focus_pending: Cell::new(false),
            state: RefCell::new(WidgetState {
                disabled: props.disabled,
                ..Default::default()
            }),
            props: RefCell::new(Props {
                label: props.label,
                options: props.options,
                visible,
                value: props.value,
            }),
            positioner: RefCell::new(Positioner::new(config.metrics())),
            list: RefCell::new(ListScroll::new(config.scroll_animation())),
            search: RefCell::new(SearchState::new()),
            listeners: RefCell::new(Listeners::default()),
            on_change: RefCell::new(None),
            binding: RefCell::new(None),
            scope: Scope::new(),
            config,
            host,
        });
        let selector = Self { inner };

        let keys = selector.listen(ListenerKinds::KEY_DOWN, |sel, ev| match ev {
            GlobalEvent::KeyDown(key) if sel.handle_key(key) => Propagation::Stop,
            _ => Propagation::Continue,
        });
        let pointer = selector.listen(
            ListenerKinds::POINTER | ListenerKinds::PRESS,
            |sel, ev| match ev {
                GlobalEvent::Press(p) if sel.handle_press(p) => Propagation::Stop,
                GlobalEvent::Pointer(p) if sel.handle_pointer(p) => Propagation::Stop,
                _ => Propagation::Continue,
            },
        );
        {
            let mut l = selector.inner.listeners.borrow_mut();
            l.keys = keys;
            l.pointer = pointer;
        }

        log::debug!("selector {anchor}: mounted (panel {panel})");
        selector
    }

    /// Closes the panel and releases every listener and binding. Idempotent.
    pub fn unmount(&self) {
        if !self.inner.mounted.replace(false) {
            return;
        }
        self.close();
        let released = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        drop(released);
        self.inner.on_change.borrow_mut().take();
        self.inner.scope.dispose();
        log::debug!("selector {}: unmounted", self.inner.anchor);
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    fn listen(
        &self,
        kinds: ListenerKinds,
        handler: fn(&Selector, &GlobalEvent) -> Propagation,
    ) -> Option<ListenerHandle> {
        let weak = Rc::downgrade(&self.inner);
        let result = self.inner.host.listen(
            kinds,
            Box::new(move |ev: &GlobalEvent| match weak.upgrade() {
                Some(inner) => handler(&Selector { inner }, ev),
                None => Propagation::Continue,
            }),
        );
        match result {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::warn!(
                    "selector {}: {err}; continuing without it",
                    self.inner.anchor
                );
                None
            }
        }
    }

    fn attach_session_listeners(&self) {
        if self.inner.listeners.borrow().scroll.is_none() {
            let handle = self.listen(ListenerKinds::SCROLL, |sel, ev| sel.on_viewport_event(ev));
            self.inner.listeners.borrow_mut().scroll = handle;
        }
        if self.inner.listeners.borrow().resize.is_none() {
            let handle = self.listen(ListenerKinds::RESIZE, |sel, ev| sel.on_viewport_event(ev));
            self.inner.listeners.borrow_mut().resize = handle;
        }
    }

    fn release_session_listeners(&self) {
        let released = {
            let mut l = self.inner.listeners.borrow_mut();
            (l.scroll.take(), l.resize.take())
        };
        drop(released);
    }

    // ---- state machine ----

    /// Opens the panel below the anchor and seeds the highlight from the
    /// current value. Focus moves to the panel after the next paint.
    pub fn open(&self) -> Result<()> {
        let inner = &self.inner;
        if !inner.mounted.get() {
            return Err(Error::Unmounted);
        }
        {
            let st = inner.state.borrow();
            if st.disabled {
                log::debug!("selector {}: open ignored while disabled", inner.anchor);
                return Err(Error::Disabled);
            }
            if st.is_open {
                return Ok(());
            }
        }
        let Some(anchor_rect) = inner.host.bounds_of(inner.anchor) else {
            log::warn!("selector {}: anchor is not laid out; staying closed", inner.anchor);
            return Err(Error::AnchorNotMounted(inner.anchor));
        };

        let (rows, seed) = {
            let props = inner.props.borrow();
            let current = if props.value.is_empty() {
                None
            } else {
                props
                    .visible
                    .iter()
                    .position(|&src| props.options[src] == props.value)
            };
            let seed = current.or_else(|| (!props.visible.is_empty()).then_some(0));
            (props.visible.len(), seed)
        };

        let panel_rect =
            inner
                .positioner
                .borrow_mut()
                .place(anchor_rect, inner.host.scroll_offset(), rows);
        {
            let mut st = inner.state.borrow_mut();
            st.is_open = true;
            st.has_rendered = true;
            st.anchor_rect = anchor_rect;
            st.panel_rect = panel_rect;
            st.highlighted = seed;
        }

        inner.list.borrow_mut().reset();
        self.sync_list(rows);
        if let Some(index) = seed {
            self.reveal(index, false);
        }

        self.attach_session_listeners();
        self.schedule_focus();
        log::debug!(
            "selector {}: opened with {rows} rows, highlight {seed:?}",
            inner.anchor
        );
        Ok(())
    }

    /// Closes without emitting. The highlight is kept; focus is left alone.
    /// The search query does not outlive the session, so indices passed to
    /// `select` afterwards refer to the full option set again.
    pub fn close(&self) {
        let was_open = std::mem::replace(&mut self.inner.state.borrow_mut().is_open, false);
        if !was_open {
            return;
        }
        self.inner.positioner.borrow_mut().invalidate();
        if !self.inner.search.borrow().is_empty() {
            self.inner.search.borrow_mut().clear();
            self.recompute_visible();
        }
        self.release_session_listeners();
        log::debug!("selector {}: closed", self.inner.anchor);
    }

    /// Commits the visible option at `index` and closes.
    ///
    /// Emits `changed` only when the option differs from the current value.
    /// An out of range index is a caller bug: it asserts in debug builds and
    /// returns `Error::InvalidIndex` otherwise, leaving everything untouched.
    pub fn select(&self, index: usize) -> Result<()> {
        let (value, changed) = {
            let props = self.inner.props.borrow();
            let len = props.visible.len();
            debug_assert!(index < len, "option index {index} out of range for {len} options");
            let Some(&src) = props.visible.get(index) else {
                return Err(Error::InvalidIndex { index, len });
            };
            let value = props.options[src].clone();
            let changed = value != props.value;
            (value, changed)
        };

        self.inner.state.borrow_mut().highlighted = Some(index);
        if changed {
            log::debug!("selector {}: committed {value:?}", self.inner.anchor);
            let callback = self.inner.on_change.borrow().clone();
            if let Some(callback) = callback {
                callback(&value);
            }
        }
        self.close();
        Ok(())
    }

    /// Moves the highlight and, while open, scrolls the row into view.
    pub fn move_highlight(&self, direction: Direction) {
        let len = self.inner.props.borrow().visible.len();
        let reveal = {
            let mut st = self.inner.state.borrow_mut();
            let next = step_highlight(st.highlighted, direction, len, self.inner.config.page_size);
            st.highlighted = next;
            next.filter(|_| st.is_open)
        };
        if let Some(index) = reveal {
            self.reveal(index, true);
        }
    }

    pub fn toggle(&self) {
        let (is_open, disabled) = {
            let st = self.inner.state.borrow();
            (st.is_open, st.disabled)
        };
        if disabled {
            return;
        }
        if is_open {
            self.close();
        } else if let Err(err) = self.open() {
            log::debug!("selector {}: toggle did not open: {err}", self.inner.anchor);
        }
    }

    // ---- props ----

    /// Replaces the option set. A different `Rc` counts as a new set even if
    /// the contents are equal; the same `Rc` is ignored.
    pub fn set_options(&self, options: OptionSet) {
        {
            let mut props = self.inner.props.borrow_mut();
            if Rc::ptr_eq(&props.options, &options) {
                return;
            }
            props.options = options;
        }
        log::trace!("selector {}: option set replaced", self.inner.anchor);
        self.refresh_visible();
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.inner.props.borrow_mut().value = value.into();
    }

    /// Disabling an open selector closes it.
    pub fn set_disabled(&self, disabled: bool) {
        self.inner.state.borrow_mut().disabled = disabled;
        if disabled {
            self.close();
        }
    }

    pub fn set_label(&self, label: impl Into<String>) {
        self.inner.props.borrow_mut().label = label.into();
    }

    /// Replaces the `changed` callback.
    pub fn on_change(&self, f: impl Fn(&str) + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Rc::new(f));
    }

    /// Two-way binding: follows `value` and writes committed selections back
    /// to it. Replaces any `on_change` callback and any earlier binding.
    /// Released on unmount.
    pub fn bind_value(&self, value: &Signal<String>) {
        if let Some(previous) = self.inner.binding.borrow_mut().take() {
            previous.run();
        }
        self.set_value(value.get());

        let weak = Rc::downgrade(&self.inner);
        let source = value.clone();
        let binding = self.inner.scope.run(|| {
            effect(move || {
                source.watch(move |v| {
                    if let Some(inner) = weak.upgrade() {
                        inner.props.borrow_mut().value = v.clone();
                    }
                })
            })
        });
        *self.inner.binding.borrow_mut() = Some(binding);

        let sink = value.clone();
        self.on_change(move |v| sink.set(v.to_string()));
    }

    // ---- input ----

    /// Keyboard routing. Only acts while the anchor or the panel has focus.
    /// Returns whether the key was consumed.
    pub fn handle_key(&self, ev: &KeyEvent) -> bool {
        let inner = &self.inner;
        if !inner.mounted.get() {
            return false;
        }
        let focused = inner.host.focused();
        if focused != Some(inner.anchor) && focused != Some(inner.panel) {
            return false;
        }
        let (is_open, disabled) = {
            let st = inner.state.borrow();
            (st.is_open, st.disabled)
        };
        if disabled {
            return false;
        }

        if !is_open {
            return match ev.key {
                Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Space => self.open().is_ok(),
                _ => false,
            };
        }

        if inner.config.searchable {
            let edit = inner.search.borrow_mut().handle_key(ev);
            if let Some(changed) = edit {
                if changed {
                    self.refresh_visible();
                }
                return true;
            }
        }

        match ev.key {
            Key::ArrowDown => self.move_highlight(Direction::Next),
            Key::ArrowUp => self.move_highlight(Direction::Prev),
            Key::Home => self.move_highlight(Direction::First),
            Key::End => self.move_highlight(Direction::Last),
            Key::PageDown => self.move_highlight(Direction::PageForward),
            Key::PageUp => self.move_highlight(Direction::PageBackward),
            Key::Enter | Key::Space => self.commit_highlighted(),
            Key::Escape => {
                self.close();
                inner.host.request_focus(Some(inner.anchor));
            }
            Key::Tab => {
                // Let focus traversal run.
                self.close();
                return false;
            }
            _ => return false,
        }
        true
    }

    /// Press phase, seen by every selector before any of them routes the
    /// press. A press in this panel picks the row under it and is claimed; a
    /// press outside both anchor and panel dismisses. Returns whether the
    /// press was claimed.
    pub fn handle_press(&self, ev: &PointerEvent) -> bool {
        let inner = &self.inner;
        let PointerEventKind::Down(button) = ev.event else {
            return false;
        };
        if !inner.mounted.get() || !inner.state.borrow().is_open {
            return false;
        }
        let point = ev.position;
        let in_panel = inner
            .positioner
            .borrow()
            .contains(point, inner.host.scroll_offset());
        if in_panel {
            if button == PointerButton::Primary
                && let Some(row) = self.row_at(point)
            {
                if let Err(err) = self.select(row) {
                    log::warn!("selector {}: {err}", inner.anchor);
                }
                self.restore_focus();
            }
            return true;
        }
        let on_anchor = inner
            .host
            .bounds_of(inner.anchor)
            .is_some_and(|r| r.contains(point));
        if !on_anchor {
            log::debug!("selector {}: dismissed by outside press", inner.anchor);
            self.close();
        }
        false
    }

    /// Pointer routing with its own hit testing. Returns whether the event
    /// was consumed. Presses not on the anchor go through the press phase,
    /// for hosts that route them without broadcasting first.
    pub fn handle_pointer(&self, ev: &PointerEvent) -> bool {
        let inner = &self.inner;
        if !inner.mounted.get() {
            return false;
        }
        let scroll = inner.host.scroll_offset();
        let point = ev.position;
        let is_open = inner.state.borrow().is_open;
        let on_anchor = inner
            .host
            .bounds_of(inner.anchor)
            .is_some_and(|r| r.contains(point));
        let in_panel = is_open && inner.positioner.borrow().contains(point, scroll);

        match ev.event {
            PointerEventKind::Down(button) => {
                if on_anchor {
                    if button == PointerButton::Primary {
                        inner.host.request_focus(Some(inner.anchor));
                        self.toggle();
                    }
                    return true;
                }
                self.handle_press(ev)
            }
            PointerEventKind::Move if in_panel => {
                if let Some(row) = self.row_at(point) {
                    inner.state.borrow_mut().highlighted = Some(row);
                }
                true
            }
            PointerEventKind::Wheel(delta) if in_panel => {
                self.scroll_list(delta.y);
                true
            }
            _ => false,
        }
    }

    fn on_viewport_event(&self, ev: &GlobalEvent) -> Propagation {
        if !self.is_open() {
            return Propagation::Continue;
        }
        match ev {
            GlobalEvent::Scroll {
                origin: ScrollOrigin::View(id),
                delta,
            } if *id == self.inner.panel => {
                self.scroll_list(delta.y);
                Propagation::Stop
            }
            GlobalEvent::Scroll { .. } => {
                self.apply_policy(self.inner.config.on_scroll, "scroll");
                Propagation::Continue
            }
            GlobalEvent::Resize(_) => {
                self.apply_policy(self.inner.config.on_resize, "resize");
                Propagation::Continue
            }
            _ => Propagation::Continue,
        }
    }

    fn apply_policy(&self, policy: ViewportPolicy, cause: &str) {
        match policy {
            ViewportPolicy::Dismiss => {
                log::debug!("selector {}: dismissed by {cause}", self.inner.anchor);
                self.close();
                self.restore_focus();
            }
            ViewportPolicy::Reposition => self.reposition(),
        }
    }

    /// Advances the list scroll animation; true while still moving.
    pub fn tick(&self) -> bool {
        self.inner.list.borrow_mut().tick()
    }

    // ---- helpers ----

    fn commit_highlighted(&self) {
        let highlighted = self.inner.state.borrow().highlighted;
        if let Some(index) = highlighted {
            if let Err(err) = self.select(index) {
                log::warn!("selector {}: {err}", self.inner.anchor);
            }
            self.restore_focus();
        }
    }

    /// Hands focus back to the anchor if it is still on the panel.
    fn restore_focus(&self) {
        if self.inner.host.focused() == Some(self.inner.panel) {
            self.inner.host.request_focus(Some(self.inner.anchor));
        }
    }

    fn schedule_focus(&self) {
        if self.inner.focus_pending.replace(true) {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        self.inner.host.after_paint(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.focus_pending.set(false);
            let is_open = inner.state.borrow().is_open;
            if is_open && inner.mounted.get() {
                inner.host.request_focus(Some(inner.panel));
            }
        }));
    }

    fn recompute_visible(&self) {
        let query = self.inner.search.borrow().text.clone();
        let mut props = self.inner.props.borrow_mut();
        props.visible = filter_options(&props.options, &query);
    }

    /// The visible rows changed (new option set or new query).
    fn refresh_visible(&self) {
        self.recompute_visible();
        let is_open = {
            let mut st = self.inner.state.borrow_mut();
            st.highlighted = None;
            if !st.is_open {
                st.has_rendered = false;
            }
            st.is_open
        };
        self.inner.list.borrow_mut().reset();
        if is_open {
            self.reposition();
        }
    }

    fn reposition(&self) {
        let inner = &self.inner;
        let Some(anchor_rect) = inner.host.bounds_of(inner.anchor) else {
            log::debug!("selector {}: anchor went away; closing", inner.anchor);
            self.close();
            return;
        };
        let rows = inner.props.borrow().visible.len();
        let rect = inner
            .positioner
            .borrow_mut()
            .place(anchor_rect, inner.host.scroll_offset(), rows);
        {
            let mut st = inner.state.borrow_mut();
            st.anchor_rect = anchor_rect;
            st.panel_rect = rect;
        }
        self.sync_list(rows);
    }

    fn sync_list(&self, rows: usize) {
        let metrics = *self.inner.positioner.borrow().metrics();
        self.inner
            .list
            .borrow_mut()
            .set_extent(metrics.viewport_height(rows), metrics.content_height(rows));
    }

    fn reveal(&self, index: usize, smooth: bool) {
        let smooth = smooth && self.inner.config.scroll_animation_ms > 0;
        let row = self.inner.positioner.borrow().metrics().row_px();
        let top = index as f32 * row;
        self.inner
            .list
            .borrow_mut()
            .ensure_visible(top, top + row, smooth);
    }

    fn scroll_list(&self, dy: f32) {
        self.inner.list.borrow_mut().scroll_immediate(dy);
    }

    fn row_at(&self, point: Vec2) -> Option<usize> {
        let rows = self.inner.props.borrow().visible.len();
        let offset = self.inner.list.borrow().offset();
        self.inner
            .positioner
            .borrow()
            .row_at(point, self.inner.host.scroll_offset(), offset, rows)
    }

    // ---- queries ----

    pub fn state(&self) -> WidgetState {
        self.inner.state.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.inner.state.borrow().is_open
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.inner.state.borrow().highlighted
    }

    pub fn value(&self) -> String {
        self.inner.props.borrow().value.clone()
    }

    pub fn label(&self) -> String {
        self.inner.props.borrow().label.clone()
    }

    pub fn options(&self) -> OptionSet {
        self.inner.props.borrow().options.clone()
    }

    /// Options currently listed in the panel, in display order.
    pub fn visible_options(&self) -> Vec<String> {
        let props = self.inner.props.borrow();
        props
            .visible
            .iter()
            .map(|&src| props.options[src].clone())
            .collect()
    }

    pub fn query(&self) -> String {
        self.inner.search.borrow().text.clone()
    }

    pub fn list_offset(&self) -> f32 {
        self.inner.list.borrow().offset()
    }

    pub fn anchor_id(&self) -> ViewId {
        self.inner.anchor
    }

    pub fn panel_id(&self) -> ViewId {
        self.inner.panel
    }

    // ---- rendering ----

    /// Builds the anchor and, once opened, the panel. Row emphasis is derived
    /// from `highlighted` and only while open.
    pub fn view(&self) -> View {
        let inner = &self.inner;
        let st = inner.state.borrow();
        let props = inner.props.borrow();
        let focused = inner.host.focused();

        let text = if props.value.is_empty() {
            props.label.clone()
        } else {
            props.value.clone()
        };
        let weak = Rc::downgrade(inner);
        let anchor = Button(text, move || {
            if let Some(inner) = weak.upgrade() {
                Selector { inner }.toggle();
            }
        })
        .with_id(inner.anchor)
        .semantics(
            Semantics::new(Role::ComboBox)
                .label(props.label.clone())
                .focused(focused == Some(inner.anchor))
                .enabled(!st.disabled)
                .expanded(st.is_open)
                .active_descendant(st.highlighted.filter(|_| st.is_open)),
        );

        let mut children = vec![anchor];
        if st.has_rendered {
            let mut rows = Vec::with_capacity(props.visible.len() + 1);
            if inner.config.searchable {
                rows.push(SearchField(
                    &inner.search.borrow(),
                    inner.config.search_hint.clone(),
                ));
            }
            for (i, &src) in props.visible.iter().enumerate() {
                let option = &props.options[src];
                rows.push(OptionRow(
                    option.clone(),
                    i,
                    st.is_open && st.highlighted == Some(i),
                    *option == props.value,
                ));
            }
            let panel = ListBox(st.panel_rect, inner.list.borrow().offset(), st.is_open)
                .with_id(inner.panel)
                .semantics(
                    Semantics::new(Role::ListBox)
                        .label(props.label.clone())
                        .focused(focused == Some(inner.panel)),
                )
                .with_children(rows);
            children.push(panel);
        }
        Column().with_children(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const ANCHOR: ViewId = 1000;

    #[derive(Default)]
    struct TestHost {
        registry: ListenerRegistry,
        sched: RefCell<Scheduler>,
        bounds: RefCell<HashMap<ViewId, Rect>>,
        bounds_queries: Cell<usize>,
        scroll: Cell<Vec2>,
    }

    impl Host for TestHost {
        fn next_id(&self) -> ViewId {
            self.sched.borrow_mut().id()
        }
        fn listen(
            &self,
            kinds: ListenerKinds,
            handler: Box<dyn Fn(&GlobalEvent) -> Propagation>,
        ) -> Result<ListenerHandle> {
            self.registry.listen(kinds, handler)
        }
        fn scroll_offset(&self) -> Vec2 {
            self.scroll.get()
        }
        fn bounds_of(&self, id: ViewId) -> Option<Rect> {
            self.bounds_queries.set(self.bounds_queries.get() + 1);
            self.bounds.borrow().get(&id).copied()
        }
        fn after_paint(&self, f: Box<dyn FnOnce()>) {
            self.sched.borrow_mut().defer_after_paint(f);
        }
        fn request_focus(&self, id: Option<ViewId>) {
            self.sched.borrow_mut().focused = id;
        }
        fn focused(&self) -> Option<ViewId> {
            self.sched.borrow().focused
        }
    }

    impl TestHost {
        fn paint(&self) {
            let callbacks = self.sched.borrow_mut().take_after_paint();
            for cb in callbacks {
                cb();
            }
        }
        fn key(&self, key: Key) -> Propagation {
            self.registry
                .dispatch(&GlobalEvent::KeyDown(KeyEvent::new(key)))
        }
    }

    fn setup(options: &[&str], value: &str, config: SelectorConfig) -> (Rc<TestHost>, Selector) {
        let host = Rc::new(TestHost::default());
        host.bounds
            .borrow_mut()
            .insert(ANCHOR, Rect::new(10.0, 50.0, 120.0, 30.0));
        let sel = Selector::mount_with(
            host.clone(),
            ANCHOR,
            SelectorProps {
                label: "Language".into(),
                options: option_set(options.iter().copied()),
                value: value.into(),
                disabled: false,
            },
            config,
        );
        host.request_focus(Some(ANCHOR));
        (host, sel)
    }

    fn abc() -> (Rc<TestHost>, Selector) {
        setup(&["a", "b", "c"], "a", SelectorConfig::default())
    }

    fn record_changes(sel: &Selector) -> Rc<RefCell<Vec<String>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let c = changes.clone();
        sel.on_change(move |v| c.borrow_mut().push(v.to_string()));
        changes
    }

    #[test]
    fn next_cycles_back_to_first() {
        for len in 1..25 {
            let mut h = None;
            for _ in 0..len {
                h = step_highlight(h, Direction::Next, len, 10);
            }
            assert_eq!(h, Some(0), "len {len}");
        }
    }

    #[test]
    fn prev_wraps_from_first() {
        for len in 1..25 {
            assert_eq!(
                step_highlight(Some(0), Direction::Prev, len, 10),
                Some(len - 1)
            );
        }
        assert_eq!(step_highlight(None, Direction::Prev, 4, 10), Some(3));
    }

    #[test]
    fn page_jumps_clamp() {
        for len in 1..40 {
            for i in 0..len {
                assert_eq!(
                    step_highlight(Some(i), Direction::PageForward, len, 10),
                    Some((i + 10).min(len - 1))
                );
                assert_eq!(
                    step_highlight(Some(i), Direction::PageBackward, len, 10),
                    Some(i.saturating_sub(10))
                );
            }
        }
        assert_eq!(step_highlight(None, Direction::PageForward, 30, 10), Some(10));
        assert_eq!(step_highlight(None, Direction::PageBackward, 30, 10), Some(0));
    }

    #[test]
    fn empty_set_has_no_highlight() {
        for dir in [
            Direction::Next,
            Direction::Prev,
            Direction::First,
            Direction::Last,
            Direction::PageForward,
            Direction::PageBackward,
        ] {
            assert_eq!(step_highlight(None, dir, 0, 10), None);
        }
    }

    #[test]
    fn select_different_value_emits_once_and_closes() {
        let (_host, sel) = abc();
        let changes = record_changes(&sel);
        sel.open().unwrap();
        sel.select(1).unwrap();
        assert_eq!(*changes.borrow(), vec!["b".to_string()]);
        assert!(!sel.is_open());
        // controlled: value only moves when the host pushes it
        assert_eq!(sel.value(), "a");
    }

    #[test]
    fn select_same_value_closes_silently() {
        let (_host, sel) = abc();
        let changes = record_changes(&sel);
        sel.open().unwrap();
        sel.select(0).unwrap();
        assert!(changes.borrow().is_empty());
        assert!(!sel.is_open());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn select_out_of_range_asserts() {
        let (_host, sel) = abc();
        let _ = sel.select(3);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn select_out_of_range_is_rejected() {
        let (_host, sel) = abc();
        let changes = record_changes(&sel);
        sel.open().unwrap();
        assert_eq!(sel.select(3), Err(Error::InvalidIndex { index: 3, len: 3 }));
        assert!(changes.borrow().is_empty());
        assert!(sel.is_open());
    }

    #[test]
    fn open_while_disabled_stays_closed_without_geometry() {
        let (host, sel) = abc();
        sel.set_disabled(true);
        let queries = host.bounds_queries.get();
        assert_eq!(sel.open(), Err(Error::Disabled));
        assert!(!sel.is_open());
        assert_eq!(host.bounds_queries.get(), queries);
        assert_eq!(sel.state().panel_rect, Rect::default());
        sel.toggle();
        assert!(!sel.is_open());
    }

    #[test]
    fn open_seeds_highlight_from_value() {
        let (_host, sel) = setup(&["a", "b", "c"], "c", SelectorConfig::default());
        sel.open().unwrap();
        assert_eq!(sel.highlighted(), Some(2));

        let (_host, sel) = setup(&["a", "b"], "zzz", SelectorConfig::default());
        sel.open().unwrap();
        assert_eq!(sel.highlighted(), Some(0));

        let (_host, sel) = setup(&[], "", SelectorConfig::default());
        sel.open().unwrap();
        assert_eq!(sel.highlighted(), None);
    }

    #[test]
    fn open_places_panel_below_anchor() {
        let (host, sel) = abc();
        host.scroll.set(Vec2::new(0.0, 300.0));
        sel.open().unwrap();
        let st = sel.state();
        assert_eq!(st.panel_rect.top(), 80.0 + 300.0);
        assert_eq!(st.panel_rect.left(), 10.0);
        assert_eq!(st.panel_rect.w, 120.0);
        assert!(st.has_rendered);
    }

    #[test]
    fn open_without_anchor_fails_quietly() {
        let (host, sel) = abc();
        host.bounds.borrow_mut().clear();
        assert_eq!(sel.open(), Err(Error::AnchorNotMounted(ANCHOR)));
        assert!(!sel.is_open());
        assert!(!sel.state().has_rendered);
    }

    #[test]
    fn alpha_beta_gamma_scenario() {
        let (_host, sel) = setup(&["alpha", "beta", "gamma"], "", SelectorConfig::default());
        let changes = record_changes(&sel);
        sel.open().unwrap();
        assert_eq!(sel.highlighted(), Some(0));
        sel.move_highlight(Direction::Next);
        assert_eq!(sel.highlighted(), Some(1));
        sel.select(1).unwrap();
        assert_eq!(*changes.borrow(), vec!["beta".to_string()]);
        assert!(!sel.is_open());
    }

    #[test]
    fn escape_closes_without_emitting_and_restores_focus() {
        let (host, sel) = abc();
        let changes = record_changes(&sel);
        sel.open().unwrap();
        host.paint();
        assert_eq!(host.focused(), Some(sel.panel_id()));
        sel.move_highlight(Direction::Next);

        assert_eq!(host.key(Key::Escape), Propagation::Stop);
        assert!(!sel.is_open());
        assert!(changes.borrow().is_empty());
        assert_eq!(sel.value(), "a");
        assert_eq!(host.focused(), Some(ANCHOR));
        // kept for resume
        assert_eq!(sel.highlighted(), Some(1));
    }

    #[test]
    fn close_keeps_highlight_and_focus() {
        let (host, sel) = abc();
        sel.open().unwrap();
        host.paint();
        sel.move_highlight(Direction::Last);
        sel.close();
        assert_eq!(sel.highlighted(), Some(2));
        assert_eq!(host.focused(), Some(sel.panel_id()));
    }

    #[test]
    fn replacing_options_while_open_resets_and_replaces_panel() {
        let (host, sel) = abc();
        sel.open().unwrap();
        sel.move_highlight(Direction::Next);
        let before = sel.state().panel_rect;

        host.bounds
            .borrow_mut()
            .insert(ANCHOR, Rect::new(10.0, 90.0, 200.0, 30.0));
        sel.set_options(option_set(["x", "y"]));
        let st = sel.state();
        assert_eq!(st.highlighted, None);
        assert!(st.is_open);
        assert_ne!(st.panel_rect, before);
        assert_eq!(st.panel_rect.top(), 120.0);
        assert_eq!(st.panel_rect.w, 200.0);
    }

    #[test]
    fn replacing_options_while_closed_clears_rendered_flag() {
        let (_host, sel) = abc();
        sel.open().unwrap();
        sel.close();
        assert!(sel.state().has_rendered);
        sel.set_options(option_set(["x"]));
        assert!(!sel.state().has_rendered);
        assert_eq!(sel.view().children.len(), 1);
    }

    #[test]
    fn same_option_set_is_ignored() {
        let (_host, sel) = abc();
        sel.open().unwrap();
        sel.move_highlight(Direction::Next);
        sel.set_options(sel.options());
        assert_eq!(sel.highlighted(), Some(1));
    }

    #[test]
    fn keys_only_route_when_focused() {
        let (host, sel) = abc();
        host.request_focus(Some(4242));
        assert_eq!(host.key(Key::ArrowDown), Propagation::Continue);
        assert!(!sel.is_open());

        host.request_focus(Some(ANCHOR));
        assert_eq!(host.key(Key::ArrowDown), Propagation::Stop);
        assert!(sel.is_open());
        // not an open key while closed
        sel.close();
        assert_eq!(host.key(Key::Character('x')), Propagation::Continue);
    }

    #[test]
    fn keyboard_traversal_and_commit() {
        let names: Vec<String> = (0..30).map(|i| format!("opt{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (host, sel) = setup(&refs, "", SelectorConfig::default());
        let changes = record_changes(&sel);

        host.key(Key::Enter);
        host.paint();
        assert_eq!(sel.highlighted(), Some(0));
        host.key(Key::PageDown);
        assert_eq!(sel.highlighted(), Some(10));
        host.key(Key::End);
        assert_eq!(sel.highlighted(), Some(29));
        host.key(Key::ArrowDown);
        assert_eq!(sel.highlighted(), Some(0));
        host.key(Key::ArrowUp);
        assert_eq!(sel.highlighted(), Some(29));
        host.key(Key::PageUp);
        assert_eq!(sel.highlighted(), Some(19));
        host.key(Key::Home);
        assert_eq!(sel.highlighted(), Some(0));
        host.key(Key::ArrowDown);

        assert_eq!(host.key(Key::Enter), Propagation::Stop);
        assert_eq!(*changes.borrow(), vec!["opt1".to_string()]);
        assert!(!sel.is_open());
        assert_eq!(host.focused(), Some(ANCHOR));
    }

    #[test]
    fn tab_closes_and_passes_through() {
        let (host, sel) = abc();
        sel.open().unwrap();
        assert_eq!(host.key(Key::Tab), Propagation::Continue);
        assert!(!sel.is_open());
    }

    #[test]
    fn highlight_scrolls_into_view() {
        let names: Vec<String> = (0..20).map(|i| format!("row{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let config = SelectorConfig {
            scroll_animation_ms: 0,
            ..Default::default()
        };
        let (_host, sel) = setup(&refs, "", config);
        sel.open().unwrap();
        sel.move_highlight(Direction::Last);
        sel.tick();
        // 20 rows of 28 with 8 visible
        assert_eq!(sel.list_offset(), 12.0 * 28.0);
        sel.move_highlight(Direction::Next);
        sel.tick();
        assert_eq!(sel.list_offset(), 0.0);
    }

    #[test]
    fn reopen_seeds_selected_row_in_view() {
        let names: Vec<String> = (0..20).map(|i| format!("row{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (_host, sel) = setup(&refs, "row15", SelectorConfig::default());
        sel.open().unwrap();
        assert_eq!(sel.highlighted(), Some(15));
        assert_eq!(sel.list_offset(), 8.0 * 28.0);
    }

    #[test]
    fn deferred_focus_runs_once_after_paint() {
        let (host, sel) = abc();
        sel.open().unwrap();
        assert_eq!(host.focused(), Some(ANCHOR));
        sel.close();
        sel.open().unwrap();
        assert_eq!(host.sched.borrow().pending_after_paint(), 1);
        host.paint();
        assert_eq!(host.focused(), Some(sel.panel_id()));
    }

    #[test]
    fn deferred_focus_skipped_if_closed_before_paint() {
        let (host, sel) = abc();
        sel.open().unwrap();
        sel.close();
        host.paint();
        assert_eq!(host.focused(), Some(ANCHOR));
    }

    #[test]
    fn listeners_are_bounded_across_sessions() {
        let (host, sel) = abc();
        assert_eq!(host.registry.len(), 2);
        for _ in 0..5 {
            sel.open().unwrap();
            assert_eq!(host.registry.count(ListenerKinds::SCROLL), 1);
            assert_eq!(host.registry.count(ListenerKinds::RESIZE), 1);
            sel.close();
            assert_eq!(host.registry.len(), 2);
        }
        sel.open().unwrap();
        sel.unmount();
        assert!(host.registry.is_empty());
        assert!(!sel.is_mounted());
        assert_eq!(sel.open(), Err(Error::Unmounted));
        sel.unmount();
    }

    #[test]
    fn dropping_last_handle_releases_listeners() {
        let (host, sel) = abc();
        sel.open().unwrap();
        assert_eq!(host.registry.len(), 4);
        drop(sel);
        assert!(host.registry.is_empty());
    }

    #[test]
    fn page_scroll_dismisses_by_default() {
        let (host, sel) = abc();
        sel.open().unwrap();
        host.registry.dispatch(&GlobalEvent::Scroll {
            origin: ScrollOrigin::Page,
            delta: Vec2::new(0.0, 10.0),
        });
        assert!(!sel.is_open());
    }

    #[test]
    fn panel_scroll_does_not_dismiss() {
        let names: Vec<String> = (0..20).map(|i| format!("row{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (host, sel) = setup(&refs, "", SelectorConfig::default());
        sel.open().unwrap();
        let prop = host.registry.dispatch(&GlobalEvent::Scroll {
            origin: ScrollOrigin::View(sel.panel_id()),
            delta: Vec2::new(0.0, 40.0),
        });
        assert_eq!(prop, Propagation::Stop);
        assert!(sel.is_open());
        assert_eq!(sel.list_offset(), 40.0);
    }

    #[test]
    fn reposition_policy_tracks_anchor() {
        let config = SelectorConfig {
            on_scroll: ViewportPolicy::Reposition,
            on_resize: ViewportPolicy::Reposition,
            ..Default::default()
        };
        let (host, sel) = setup(&["a", "b"], "", config);
        sel.open().unwrap();

        host.scroll.set(Vec2::new(0.0, 100.0));
        host.bounds
            .borrow_mut()
            .insert(ANCHOR, Rect::new(10.0, -50.0, 120.0, 30.0));
        host.registry.dispatch(&GlobalEvent::Scroll {
            origin: ScrollOrigin::Page,
            delta: Vec2::new(0.0, 100.0),
        });
        assert!(sel.is_open());
        assert_eq!(sel.state().panel_rect.top(), 80.0);

        host.bounds
            .borrow_mut()
            .insert(ANCHOR, Rect::new(40.0, -50.0, 60.0, 30.0));
        host.registry
            .dispatch(&GlobalEvent::Resize(Size::new(400.0, 300.0)));
        assert!(sel.is_open());
        assert_eq!(sel.state().panel_rect.w, 60.0);
    }

    #[test]
    fn resize_dismisses_by_default() {
        let (host, sel) = abc();
        sel.open().unwrap();
        host.registry
            .dispatch(&GlobalEvent::Resize(Size::new(800.0, 600.0)));
        assert!(!sel.is_open());
    }

    #[test]
    fn restricted_host_degrades() {
        let (host, sel) = {
            let host = Rc::new(TestHost {
                registry: ListenerRegistry::with_allowed(ListenerKinds::KEY_DOWN),
                ..Default::default()
            });
            host.bounds
                .borrow_mut()
                .insert(ANCHOR, Rect::new(0.0, 0.0, 100.0, 20.0));
            let sel = Selector::mount_with(
                host.clone(),
                ANCHOR,
                SelectorProps {
                    options: option_set(["a", "b"]),
                    ..Default::default()
                },
                SelectorConfig::default(),
            );
            (host, sel)
        };
        assert_eq!(host.registry.len(), 1);
        sel.open().unwrap();
        assert_eq!(host.registry.len(), 1);
        // nothing dismisses it but explicit close
        host.registry
            .dispatch(&GlobalEvent::Resize(Size::new(1.0, 1.0)));
        assert!(sel.is_open());
        sel.close();
        assert!(!sel.is_open());
    }

    #[test]
    fn pointer_toggle_hover_and_select() {
        let (host, sel) = abc();
        let changes = record_changes(&sel);
        let press = |x: f32, y: f32| {
            host.registry.dispatch(&GlobalEvent::Pointer(PointerEvent::mouse(
                PointerEventKind::Down(PointerButton::Primary),
                Vec2::new(x, y),
            )))
        };

        assert_eq!(press(20.0, 60.0), Propagation::Stop);
        assert!(sel.is_open());
        host.paint();

        // panel starts at y = 80, rows after 4px padding
        host.registry.dispatch(&GlobalEvent::Pointer(PointerEvent::mouse(
            PointerEventKind::Move,
            Vec2::new(20.0, 84.0 + 28.0 * 2.0 + 1.0),
        )));
        assert_eq!(sel.highlighted(), Some(2));

        assert_eq!(press(20.0, 84.0 + 28.0 + 1.0), Propagation::Stop);
        assert_eq!(*changes.borrow(), vec!["b".to_string()]);
        assert!(!sel.is_open());
        assert_eq!(host.focused(), Some(ANCHOR));
    }

    #[test]
    fn outside_press_dismisses_without_consuming() {
        let (host, sel) = abc();
        sel.open().unwrap();
        let prop = host.registry.dispatch(&GlobalEvent::Pointer(PointerEvent::mouse(
            PointerEventKind::Down(PointerButton::Primary),
            Vec2::new(500.0, 500.0),
        )));
        assert_eq!(prop, Propagation::Continue);
        assert!(!sel.is_open());
    }

    #[test]
    fn wheel_over_panel_scrolls_list() {
        let names: Vec<String> = (0..20).map(|i| format!("row{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (host, sel) = setup(&refs, "", SelectorConfig::default());
        sel.open().unwrap();
        let prop = host.registry.dispatch(&GlobalEvent::Pointer(PointerEvent::mouse(
            PointerEventKind::Wheel(Vec2::new(0.0, 30.0)),
            Vec2::new(20.0, 100.0),
        )));
        assert_eq!(prop, Propagation::Stop);
        assert_eq!(sel.list_offset(), 30.0);
        assert!(sel.is_open());
    }

    #[test]
    fn searchable_filters_and_commits_visible_row() {
        let config = SelectorConfig {
            searchable: true,
            ..Default::default()
        };
        let (host, sel) = setup(&["English", "Japanese", "Javanese"], "", config);
        let changes = record_changes(&sel);
        sel.open().unwrap();
        host.paint();

        for c in "jav".chars() {
            assert_eq!(host.key(Key::Character(c)), Propagation::Stop);
        }
        assert_eq!(sel.query(), "jav");
        assert_eq!(sel.visible_options(), vec!["Javanese".to_string()]);
        assert_eq!(sel.highlighted(), None);
        // space goes to the query, not commit
        host.key(Key::Space);
        assert!(sel.is_open());
        host.key(Key::Backspace);

        host.key(Key::ArrowDown);
        host.key(Key::Enter);
        assert_eq!(*changes.borrow(), vec!["Javanese".to_string()]);

        // fresh query next session
        sel.open().unwrap();
        assert_eq!(sel.query(), "");
        assert_eq!(sel.visible_options().len(), 3);
    }

    #[test]
    fn dismissed_search_session_leaves_full_option_set() {
        let config = SelectorConfig {
            searchable: true,
            ..Default::default()
        };
        let (host, sel) = setup(&["English", "Japanese", "Javanese"], "", config);
        let changes = record_changes(&sel);
        sel.open().unwrap();
        host.paint();
        for c in "jav".chars() {
            host.key(Key::Character(c));
        }
        assert_eq!(sel.visible_options().len(), 1);

        host.key(Key::Escape);
        assert!(!sel.is_open());
        assert_eq!(sel.query(), "");
        assert_eq!(sel.visible_options().len(), 3);

        sel.select(2).unwrap();
        assert_eq!(*changes.borrow(), vec!["Javanese".to_string()]);
    }

    #[test]
    fn rebinding_releases_previous_signal() {
        let (_host, sel) = abc();
        let first = signal("a".to_string());
        let second = signal("b".to_string());

        sel.bind_value(&first);
        assert_eq!(first.subscriber_count(), 1);
        sel.bind_value(&second);
        assert_eq!(first.subscriber_count(), 0);
        assert_eq!(second.subscriber_count(), 1);
        assert_eq!(sel.value(), "b");

        first.set("c".to_string());
        assert_eq!(sel.value(), "b");

        sel.unmount();
        assert_eq!(second.subscriber_count(), 0);
    }

    #[test]
    fn view_reflects_state_declaratively() {
        let (host, sel) = abc();
        let v = sel.view();
        assert_eq!(v.children.len(), 1);
        let anchor = &v.children[0];
        assert_eq!(anchor.id, ANCHOR);
        let sem = anchor.semantics.as_ref().unwrap();
        assert_eq!(sem.role, Role::ComboBox);
        assert_eq!(sem.expanded, Some(false));
        assert_eq!(sem.label.as_deref(), Some("Language"));
        sel.set_label("Interface language");
        let v = sel.view();
        assert_eq!(
            v.children[0].semantics.as_ref().unwrap().label.as_deref(),
            Some("Interface language")
        );

        sel.open().unwrap();
        host.paint();
        sel.move_highlight(Direction::Next);
        let v = sel.view();
        let panel = v.find(|n| n.id == sel.panel_id()).unwrap();
        assert!(matches!(panel.kind, ViewKind::ListBox { visible: true, .. }));
        let flags: Vec<(bool, bool)> = panel
            .children
            .iter()
            .map(|row| match row.kind {
                ViewKind::OptionRow {
                    highlighted,
                    selected,
                    ..
                } => (highlighted, selected),
                _ => panic!("unexpected child {:?}", row.kind),
            })
            .collect();
        assert_eq!(flags, vec![(false, true), (true, false), (false, false)]);
        assert_eq!(
            v.children[0].semantics.as_ref().unwrap().active_descendant,
            Some(1)
        );

        sel.close();
        let v = sel.view();
        let panel = v.find(|n| n.id == sel.panel_id()).unwrap();
        assert!(matches!(panel.kind, ViewKind::ListBox { visible: false, .. }));
        assert!(panel.children.iter().all(|row| !matches!(
            row.kind,
            ViewKind::OptionRow {
                highlighted: true,
                ..
            }
        )));
    }

    #[test]
    fn anchor_click_callback_toggles() {
        let (_host, sel) = abc();
        let v = sel.view();
        let ViewKind::Button {
            on_click: Some(cb), ..
        } = &v.children[0].kind
        else {
            panic!("anchor is not a button");
        };
        cb();
        assert!(sel.is_open());
    }

    #[test]
    fn bind_value_round_trips_through_signal() {
        let (_host, sel) = abc();
        let value = signal("c".to_string());
        sel.bind_value(&value);
        assert_eq!(sel.value(), "c");

        sel.open().unwrap();
        assert_eq!(sel.highlighted(), Some(2));
        sel.select(0).unwrap();
        assert_eq!(value.get(), "a");
        assert_eq!(sel.value(), "a");

        value.set("b".into());
        assert_eq!(sel.value(), "b");

        sel.unmount();
        assert_eq!(value.subscriber_count(), 0);
    }

    #[test]
    fn ambient_config_applies_at_mount() {
        let host = Rc::new(TestHost::default());
        host.bounds
            .borrow_mut()
            .insert(ANCHOR, Rect::new(0.0, 0.0, 100.0, 20.0));
        let names: Vec<String> = (0..30).map(|i| format!("{i}")).collect();
        let sel = crate::config::with_selector_config(
            SelectorConfig {
                page_size: 3,
                ..Default::default()
            },
            || {
                Selector::mount(
                    host.clone(),
                    ANCHOR,
                    SelectorProps {
                        options: option_set(names),
                        ..Default::default()
                    },
                )
            },
        );
        sel.open().unwrap();
        sel.move_highlight(Direction::PageForward);
        assert_eq!(sel.highlighted(), Some(3));
    }
}
