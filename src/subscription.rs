use crate::disposable::Disposable;
use smallvec::SmallVec;
use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::{Rc, Weak},
};

pub(crate) type Handler<T> = Rc<dyn Fn(&T)>;

/// A live binding of one handler to one stream.
///
/// Returned from `subscribe`. Disposing it detaches the handler from its
/// source and forgets the source; the handler is replaced with nothing, so a
/// notification pass that already holds this subscription skips it.
///
/// Cloning yields another handle to the same subscription.
pub struct Subscription<T>(Rc<Slot<T>>);

pub(crate) struct Slot<T> {
  source: RefCell<Weak<Subscribers<T>>>,
  handler: RefCell<Option<Handler<T>>>,
}

impl<T> Subscription<T> {
  pub(crate) fn new(source: &Rc<Subscribers<T>>, handler: Handler<T>) -> Self {
    Self(Rc::new(Slot {
      source: RefCell::new(Rc::downgrade(source)),
      handler: RefCell::new(Some(handler)),
    }))
  }

  #[inline]
  fn is_same(&self, slot: &Rc<Slot<T>>) -> bool { Rc::ptr_eq(&self.0, slot) }
}

impl<T> Disposable for Subscription<T> {
  fn dispose(&self) {
    let source = self.0.source.replace(Weak::new());
    if let Some(source) = source.upgrade() {
      source.remove(self);
    }
    // dropped outside of the borrow: the handler may own streams whose
    // teardown reaches back into this subscription
    let stale = self.0.handler.borrow_mut().take();
    drop(stale);
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.handler.borrow().is_none() }
}

impl<T> Clone for Subscription<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Debug for Subscription<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// The active subscriptions of a stream, in notification order.
pub(crate) struct Subscribers<T> {
  entries: RefCell<SmallVec<[Rc<Slot<T>>; 2]>>,
}

impl<T> Default for Subscribers<T> {
  fn default() -> Self { Self { entries: RefCell::new(SmallVec::new()) } }
}

impl<T> Subscribers<T> {
  /// Registers `handler` at the end of the notification order.
  pub(crate) fn add(self: &Rc<Self>, handler: Handler<T>) -> Subscription<T> {
    let subscription = Subscription::new(self, handler);
    self.entries.borrow_mut().push(subscription.0.clone());
    subscription
  }

  /// Removes `subscription` if it is still active. Absent entries are ignored.
  pub(crate) fn remove(&self, subscription: &Subscription<T>) {
    self
      .entries
      .borrow_mut()
      .retain(|slot| !subscription.is_same(slot));
  }

  #[inline]
  pub(crate) fn len(&self) -> usize { self.entries.borrow().len() }

  /// Invokes every handler active when the pass starts.
  ///
  /// The pass runs over a snapshot: subscriptions added by a handler wait for
  /// the next pass, and subscriptions disposed by a handler are skipped
  /// because their handler is gone.
  pub(crate) fn notify(&self, value: &T) {
    let snapshot: SmallVec<[Rc<Slot<T>>; 4]> = self.entries.borrow().iter().cloned().collect();
    for slot in snapshot {
      let handler = slot.handler.borrow().clone();
      if let Some(handler) = handler {
        handler(value);
      }
    }
  }

  /// Detaches and disposes every active subscription.
  pub(crate) fn dispose_all(&self) {
    let entries = std::mem::take(&mut *self.entries.borrow_mut());
    for slot in entries {
      Subscription(slot).dispose();
    }
  }
}
