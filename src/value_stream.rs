use crate::{
  disposable::{Disposable, OwnedEntry},
  stream_core::StreamCore,
  subscription::Subscription,
};
use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::{Rc, Weak},
};

/// A reactive container that always holds a value, seeded at construction.
///
/// [`update`](ValueStream::update) replaces the value and synchronously
/// notifies the active subscribers in subscription order. Replay always has a
/// value to deliver.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxstream::prelude::*;
///
/// let stream = ValueStream::new(0);
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
///
/// stream.subscribe(true, move |v: &i32| c_seen.borrow_mut().push(*v));
/// stream.update(1).update(2);
///
/// assert_eq!(*seen.borrow(), vec![0, 1, 2]);
/// assert_eq!(stream.value(), 2);
/// ```
pub struct ValueStream<T>(Rc<ValueInner<T>>);

pub(crate) struct ValueInner<T> {
  core: StreamCore<T>,
  value: RefCell<T>,
}

pub(crate) struct WeakValueStream<T>(Weak<ValueInner<T>>);

impl<T> WeakValueStream<T> {
  #[inline]
  pub(crate) fn upgrade(&self) -> Option<ValueStream<T>> { self.0.upgrade().map(ValueStream) }
}

impl<T: Clone + 'static> ValueStream<T> {
  pub fn new(value: T) -> Self {
    Self(Rc::new(ValueInner {
      core: StreamCore::new("value"),
      value: RefCell::new(value),
    }))
  }

  /// Registers `handler` after every existing subscriber, invoking it with
  /// the current value before returning when `replay` is set.
  pub fn subscribe(&self, replay: bool, handler: impl Fn(&T) + 'static) -> Subscription<T> {
    let handler: Rc<dyn Fn(&T)> = Rc::new(handler);
    let subscription = self.0.core.subscribe(handler.clone());
    if replay {
      handler(&self.value());
    }
    subscription
  }

  #[inline]
  pub fn unsubscribe(&self, subscription: &Subscription<T>) {
    self.0.core.unsubscribe(subscription)
  }

  /// Replaces the value and notifies every active subscriber once.
  pub fn update(&self, value: T) -> &Self {
    let stale = self.0.value.replace(value.clone());
    drop(stale);
    self.0.core.notify(&value);
    self
  }

  #[inline]
  pub fn value(&self) -> T { self.0.value.borrow().clone() }

  #[inline]
  pub fn subscriber_count(&self) -> usize { self.0.core.subscriber_count() }

  #[inline]
  pub fn add_disposable(&self, item: impl Disposable + 'static) {
    self.0.core.add_disposable(item)
  }

  #[inline]
  pub(crate) fn add_owned(&self, item: impl Disposable + 'static) -> OwnedEntry {
    self.0.core.add_owned(item)
  }

  #[cfg(test)]
  pub(crate) fn owned_count(&self) -> usize { self.0.core.owned_count() }

  /// Detaches every subscriber and releases every owned resource. The value
  /// is kept and the stream stays usable.
  pub fn dispose(&self) { self.0.core.teardown() }

  #[inline]
  pub(crate) fn downgrade(&self) -> WeakValueStream<T> { WeakValueStream(Rc::downgrade(&self.0)) }
}

impl<T: Clone + 'static> Disposable for ValueStream<T> {
  #[inline]
  fn dispose(&self) { ValueStream::dispose(self) }

  /// True from `dispose` until the next `subscribe` or `update`.
  #[inline]
  fn is_disposed(&self) -> bool { self.0.core.is_disposed() }
}

impl<T> Clone for ValueStream<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T: Debug> Debug for ValueStream<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ValueStream")
      .field("value", &*self.0.value.borrow())
      .field("subscribers", &self.0.core.subscriber_count())
      .finish()
  }
}
