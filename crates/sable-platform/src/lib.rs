//! Hosts for Sable widgets.
//!
//! [`HeadlessHost`] is a complete [`Host`] without a window: it owns the
//! listener registry, a layout table of view bounds, the page scroll offset,
//! focus, and the after‑paint queue. Runners feed it input; tests and the
//! demo drive it directly.
//!
//! ```rust
//! use sable_core::*;
//! use sable_platform::HeadlessHost;
//!
//! let host = HeadlessHost::new(Size::new(800.0, 600.0));
//! let hits = std::rc::Rc::new(std::cell::Cell::new(0));
//! let h = hits.clone();
//! let _resize = host
//!     .listen(
//!         ListenerKinds::RESIZE,
//!         Box::new(move |_| {
//!             h.set(h.get() + 1);
//!             Propagation::Continue
//!         }),
//!     )
//!     .unwrap();
//! host.resize(Size::new(1024.0, 768.0));
//! assert_eq!(hits.get(), 1);
//! ```
//!
//! With the `desktop` feature, [`keymap`] converts winit keyboard and wheel
//! input into Sable events.

mod common;
#[cfg(feature = "desktop")]
pub mod keymap;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use sable_core::*;

pub use common::{LINE_SCROLL_PX, pe_down_primary, pe_move, pe_up_primary, pe_wheel};

pub struct HeadlessHost {
    registry: ListenerRegistry,
    sched: RefCell<Scheduler>,
    layout: RefCell<HashMap<ViewId, Rect>>,
    scroll: Cell<Vec2>,
    viewport: Cell<Size>,
    a11y: RefCell<Box<dyn A11yBridge>>,
    last_focus: Cell<Option<ViewId>>,
}

impl HeadlessHost {
    pub fn new(viewport: Size) -> Rc<Self> {
        Self::with_registry(viewport, ListenerRegistry::new())
    }

    /// A host that refuses page listeners outside `allowed`, like an
    /// embedding that does not expose window events.
    pub fn restricted(viewport: Size, allowed: ListenerKinds) -> Rc<Self> {
        Self::with_registry(viewport, ListenerRegistry::with_allowed(allowed))
    }

    fn with_registry(viewport: Size, registry: ListenerRegistry) -> Rc<Self> {
        Rc::new(Self {
            registry,
            sched: RefCell::new(Scheduler::new()),
            layout: RefCell::new(HashMap::new()),
            scroll: Cell::new(Vec2::ZERO),
            viewport: Cell::new(viewport),
            a11y: RefCell::new(default_a11y()),
            last_focus: Cell::new(None),
        })
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    pub fn set_a11y(&self, bridge: Box<dyn A11yBridge>) {
        *self.a11y.borrow_mut() = bridge;
    }

    pub fn viewport(&self) -> Size {
        self.viewport.get()
    }

    /// Records where `id` is laid out, in viewport coordinates.
    pub fn set_bounds(&self, id: ViewId, rect: Rect) {
        self.layout.borrow_mut().insert(id, rect);
    }

    pub fn remove_bounds(&self, id: ViewId) {
        self.layout.borrow_mut().remove(&id);
    }

    /// Scrolls the page: laid out views move by `-delta` in the viewport,
    /// then scroll listeners run.
    pub fn scroll_page(&self, delta: Vec2) -> Propagation {
        let s = self.scroll.get();
        self.scroll.set(Vec2::new(s.x + delta.x, s.y + delta.y));
        for rect in self.layout.borrow_mut().values_mut() {
            *rect = rect.translate(-delta.x, -delta.y);
        }
        log::trace!("page scrolled to {:?}", self.scroll.get());
        self.registry.dispatch(&GlobalEvent::Scroll {
            origin: ScrollOrigin::Page,
            delta,
        })
    }

    /// Reports a scroll inside the scroll container `id`.
    pub fn scroll_view(&self, id: ViewId, delta: Vec2) -> Propagation {
        self.registry.dispatch(&GlobalEvent::Scroll {
            origin: ScrollOrigin::View(id),
            delta,
        })
    }

    pub fn resize(&self, size: Size) -> Propagation {
        self.viewport.set(size);
        log::debug!("viewport resized to {}x{}", size.width, size.height);
        self.registry.dispatch(&GlobalEvent::Resize(size))
    }

    pub fn key_down(&self, ev: KeyEvent) -> Propagation {
        self.registry.dispatch(&GlobalEvent::KeyDown(ev))
    }

    pub fn press_key(&self, key: Key) -> Propagation {
        self.key_down(KeyEvent::new(key))
    }

    /// Routes a pointer event to listeners. Presses are first broadcast to
    /// every press listener; a claimed press is not routed further. An
    /// unconsumed wheel scrolls the page.
    pub fn pointer(&self, ev: PointerEvent) -> Propagation {
        if matches!(ev.event, PointerEventKind::Down(_))
            && self.registry.broadcast(&GlobalEvent::Press(ev.clone())) == Propagation::Stop
        {
            return Propagation::Stop;
        }
        let wheel = match ev.event {
            PointerEventKind::Wheel(delta) => Some(delta),
            _ => None,
        };
        match self.registry.dispatch(&GlobalEvent::Pointer(ev)) {
            Propagation::Stop => Propagation::Stop,
            Propagation::Continue => match wheel {
                Some(delta) => self.scroll_page(delta),
                None => Propagation::Continue,
            },
        }
    }

    /// Primary press and release at `pos`.
    pub fn click(&self, pos: Vec2) -> Propagation {
        let down = self.pointer(pe_down_primary(pos, Modifiers::default()));
        self.pointer(pe_up_primary(pos, Modifiers::default()));
        down
    }

    /// Produces a frame from `root`, publishes its semantics, then runs the
    /// callbacks that were waiting for this paint.
    pub fn paint(&self, root: View) -> Frame {
        let frame = self.sched.borrow_mut().frame(root);
        self.a11y.borrow_mut().publish_tree(&frame.semantics_nodes);

        let callbacks = self.sched.borrow_mut().take_after_paint();
        if !callbacks.is_empty() {
            log::trace!("frame {}: {} after-paint callbacks", frame.index, callbacks.len());
        }
        for cb in callbacks {
            cb();
        }

        let focused = self.focused();
        if self.last_focus.replace(focused) != focused {
            let node = focused.and_then(|id| frame.semantics_nodes.iter().find(|n| n.id == id));
            self.a11y.borrow_mut().focus_changed(node);
        }
        frame
    }

    pub fn pending_after_paint(&self) -> usize {
        self.sched.borrow().pending_after_paint()
    }
}

impl Host for HeadlessHost {
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
        self.layout.borrow().get(&id).copied()
    }

    fn after_paint(&self, f: Box<dyn FnOnce()>) {
        self.sched.borrow_mut().defer_after_paint(f);
    }

    fn request_focus(&self, id: Option<ViewId>) {
        log::trace!("focus -> {id:?}");
        self.sched.borrow_mut().focused = id;
    }

    fn focused(&self) -> Option<ViewId> {
        self.sched.borrow().focused
    }
}

/// Sink for the semantics tree (Noop by default; logs on Linux for now).
pub trait A11yBridge {
    fn publish_tree(&mut self, nodes: &[SemNode]);
    fn focus_changed(&mut self, node: Option<&SemNode>);
}

fn default_a11y() -> Box<dyn A11yBridge> {
    #[cfg(target_os = "linux")]
    {
        Box::new(LinuxAtspiStub)
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(NoopA11y)
    }
}

pub struct NoopA11y;
impl A11yBridge for NoopA11y {
    fn publish_tree(&mut self, _nodes: &[SemNode]) {}
    fn focus_changed(&mut self, node: Option<&SemNode>) {
        if let Some(n) = node {
            log::info!("A11y focus: {:?} {:?}", n.role, n.label);
        } else {
            log::info!("A11y focus: None");
        }
    }
}

#[cfg(target_os = "linux")]
struct LinuxAtspiStub;
#[cfg(target_os = "linux")]
impl A11yBridge for LinuxAtspiStub {
    fn publish_tree(&mut self, nodes: &[SemNode]) {
        log::debug!("AT-SPI stub: publish {} nodes", nodes.len());
    }
    fn focus_changed(&mut self, node: Option<&SemNode>) {
        if let Some(n) = node {
            log::info!("AT-SPI stub focus: {:?} {:?} expanded={:?}", n.role, n.label, n.expanded);
        } else {
            log::info!("AT-SPI stub focus: None");
        }
    }
}
