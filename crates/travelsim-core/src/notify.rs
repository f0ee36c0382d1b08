//! Synchronous observer lists
//!
//! Every observable (the manager, each location, segment and vehicle)
//! owns a [`Notifier`] over its own notifiee trait. Posting invokes the
//! hook on every attached notifiee, in attach order, before returning.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Notifier::attach`], used to detach later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of attached notifiees
///
/// Attach and detach take `&self` so that a notifiee holding a shared
/// handle to the notifier can detach itself from inside a hook. Posting
/// iterates a snapshot taken at call time: a notifiee detached mid-post
/// is neither skipped nor called twice for that post.
pub struct Notifier<N: ?Sized> {
    next_id: Cell<u64>,
    notifiees: RefCell<Vec<(SubscriptionId, Rc<N>)>>,
}

impl<N: ?Sized> Notifier<N> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            notifiees: RefCell::new(Vec::new()),
        }
    }

    /// Attach a notifiee at the end of the list
    pub fn attach(&self, notifiee: Rc<N>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.notifiees.borrow_mut().push((id, notifiee));
        id
    }

    /// Detach a notifiee; returns false if it was not attached
    pub fn detach(&self, id: SubscriptionId) -> bool {
        let mut notifiees = self.notifiees.borrow_mut();
        match notifiees.iter().position(|(sid, _)| *sid == id) {
            Some(pos) => {
                notifiees.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.notifiees.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiees.borrow().is_empty()
    }

    /// Invoke `hook` on every attached notifiee in attach order
    pub fn post(&self, hook: impl Fn(&N)) {
        let snapshot: Vec<Rc<N>> = self
            .notifiees
            .borrow()
            .iter()
            .map(|(_, n)| Rc::clone(n))
            .collect();

        for notifiee in snapshot {
            hook(&*notifiee);
        }
    }
}

impl<N: ?Sized> Default for Notifier<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: ?Sized> fmt::Debug for Notifier<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("notifiees", &self.len())
            .finish()
    }
}
