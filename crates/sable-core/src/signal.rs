use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::Dispose;

pub type SubId = usize;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Observable value handle. Clones share the same value.
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    next_id: SubId,
    subs: Vec<(SubId, Subscriber<T>)>,
}

impl<T: Clone> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            next_id: 0,
            subs: Vec::new(),
        })))
    }

    pub fn get(&self) -> T {
        self.0.borrow().value.clone()
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    /// Subscribers may read or write the signal; they see a snapshot.
    fn notify(&self) {
        let (value, subs) = {
            let inner = self.0.borrow();
            let subs: SmallVec<[Subscriber<T>; 4]> =
                inner.subs.iter().map(|(_, s)| s.clone()).collect();
            (inner.value.clone(), subs)
        };
        for s in subs {
            s(&value);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subs.push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubId) {
        self.0.borrow_mut().subs.retain(|(sid, _)| *sid != id);
    }

    /// Subscribes and returns a token that unsubscribes when run.
    pub fn watch(&self, f: impl Fn(&T) + 'static) -> Dispose {
        let id = self.subscribe(f);
        let weak = Rc::downgrade(&self.0);
        Dispose::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().subs.retain(|(sid, _)| *sid != id);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }
}

pub fn signal<T: Clone>(t: T) -> Signal<T> {
    Signal::new(t)
}
