//! # Global listeners
//!
//! Page-level signals (scroll, resize, key-down, pointer) are delivered
//! through a [`ListenerRegistry`]. Registration never hands out a bare id:
//! it returns a [`ListenerHandle`] that unregisters on `dispose()` or on drop,
//! so a widget that keeps its handles in fields cannot leak listeners on any
//! exit path.
//!
//! ```rust
//! use sable_core::*;
//!
//! let registry = ListenerRegistry::new();
//! let mut handle = registry
//!     .listen(ListenerKinds::RESIZE, |_ev| Propagation::Continue)
//!     .unwrap();
//! assert_eq!(registry.count(ListenerKinds::RESIZE), 1);
//!
//! handle.dispose();
//! assert_eq!(registry.len(), 0);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use bitflags::bitflags;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::{Dispose, Error, KeyEvent, PointerEvent, Result, Size, Vec2, ViewId};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ListenerKinds: u8 {
        const SCROLL = 1 << 0;
        const RESIZE = 1 << 1;
        const KEY_DOWN = 1 << 2;
        const POINTER = 1 << 3;
        const PRESS = 1 << 4;
    }
}

/// Where a scroll happened. Scrolling inside a view (e.g. a panel's own list)
/// is reported with that view's id so listeners can tell it from page scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollOrigin {
    Page,
    View(ViewId),
}

#[derive(Clone, Debug)]
pub enum GlobalEvent {
    Scroll { origin: ScrollOrigin, delta: Vec2 },
    Resize(Size),
    KeyDown(KeyEvent),
    /// Every pointer event, before the page handles it (wheel → page scroll).
    Pointer(PointerEvent),
    /// A pointer press, broadcast to every press listener before it is
    /// routed as `Pointer`. Outside-press dismissal hangs off this.
    Press(PointerEvent),
}

impl GlobalEvent {
    pub fn kind(&self) -> ListenerKinds {
        match self {
            GlobalEvent::Scroll { .. } => ListenerKinds::SCROLL,
            GlobalEvent::Resize(_) => ListenerKinds::RESIZE,
            GlobalEvent::KeyDown(_) => ListenerKinds::KEY_DOWN,
            GlobalEvent::Pointer(_) => ListenerKinds::POINTER,
            GlobalEvent::Press(_) => ListenerKinds::PRESS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

pub type Handler = Rc<dyn Fn(&GlobalEvent) -> Propagation>;

new_key_type! {
    pub struct ListenerKey;
}

struct Entry {
    kinds: ListenerKinds,
    seq: u64,
    handler: Handler,
}

struct Registry {
    listeners: SlotMap<ListenerKey, Entry>,
    allowed: ListenerKinds,
    next_seq: u64,
}

/// Shared registry handle; clones refer to the same registry.
#[derive(Clone)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::with_allowed(ListenerKinds::all())
    }

    /// Registry that refuses kinds outside `allowed` (restricted hosts).
    pub fn with_allowed(allowed: ListenerKinds) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                listeners: SlotMap::with_key(),
                allowed,
                next_seq: 0,
            })),
        }
    }

    pub fn listen(
        &self,
        kinds: ListenerKinds,
        handler: impl Fn(&GlobalEvent) -> Propagation + 'static,
    ) -> Result<ListenerHandle> {
        let mut reg = self.inner.borrow_mut();
        if !reg.allowed.contains(kinds) {
            return Err(Error::ListenerRejected(kinds.difference(reg.allowed)));
        }
        let seq = reg.next_seq;
        reg.next_seq += 1;
        let key = reg.listeners.insert(Entry {
            kinds,
            seq,
            handler: Rc::new(handler),
        });
        log::trace!("listener {key:?} registered for {kinds:?}");
        Ok(ListenerHandle {
            key,
            kinds,
            registry: Rc::downgrade(&self.inner),
        })
    }

    /// Delivers `event` to matching listeners in registration order until one
    /// returns `Propagation::Stop`.
    ///
    /// Handlers run without the registry borrowed, so they may register or
    /// dispose listeners. A listener disposed by an earlier handler in the
    /// same dispatch is skipped.
    pub fn dispatch(&self, event: &GlobalEvent) -> Propagation {
        for (key, handler) in self.targets(event.kind()) {
            if !self.inner.borrow().listeners.contains_key(key) {
                continue;
            }
            if handler(event) == Propagation::Stop {
                return Propagation::Stop;
            }
        }
        Propagation::Continue
    }

    /// Delivers `event` to every matching listener, whatever they return.
    /// The result is `Stop` if any of them claimed it.
    pub fn broadcast(&self, event: &GlobalEvent) -> Propagation {
        let mut result = Propagation::Continue;
        for (key, handler) in self.targets(event.kind()) {
            if !self.inner.borrow().listeners.contains_key(key) {
                continue;
            }
            if handler(event) == Propagation::Stop {
                result = Propagation::Stop;
            }
        }
        result
    }

    /// Snapshot of matching handlers in registration order.
    fn targets(&self, kind: ListenerKinds) -> SmallVec<[(ListenerKey, Handler); 8]> {
        let reg = self.inner.borrow();
        let mut targets: SmallVec<[(u64, ListenerKey, Handler); 8]> = reg
            .listeners
            .iter()
            .filter(|(_, e)| e.kinds.intersects(kind))
            .map(|(k, e)| (e.seq, k, e.handler.clone()))
            .collect();
        targets.sort_by_key(|(seq, _, _)| *seq);
        targets.into_iter().map(|(_, k, h)| (k, h)).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of listeners subscribed to any of `kinds`.
    pub fn count(&self, kinds: ListenerKinds) -> usize {
        self.inner
            .borrow()
            .listeners
            .values()
            .filter(|e| e.kinds.intersects(kinds))
            .count()
    }
}

/// Registration token. Dropping it unregisters the listener.
pub struct ListenerHandle {
    key: ListenerKey,
    kinds: ListenerKinds,
    registry: Weak<RefCell<Registry>>,
}

impl ListenerHandle {
    pub fn kinds(&self) -> ListenerKinds {
        self.kinds
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.borrow().listeners.contains_key(self.key))
    }

    /// Idempotent; keys are generational so a second removal is a no-op.
    pub fn dispose(&mut self) {
        if let Some(reg) = self.registry.upgrade()
            && reg.borrow_mut().listeners.remove(self.key).is_some()
        {
            log::trace!("listener {:?} released ({:?})", self.key, self.kinds);
        }
    }

    pub fn into_dispose(self) -> Dispose {
        Dispose::new(move || drop(self))
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("key", &self.key)
            .field("kinds", &self.kinds)
            .field("active", &self.is_active())
            .finish()
    }
}
