use crate::{
  disposable::{Disposable, Disposables, OwnedEntry},
  subscription::{Handler, Subscribers, Subscription},
};
use std::{cell::Cell, rc::Rc};
use tracing::trace;

/// State shared by both stream kinds: who listens, and what the stream owns.
pub(crate) struct StreamCore<T> {
  subscribers: Rc<Subscribers<T>>,
  disposables: Rc<Disposables>,
  disposed: Cell<bool>,
  kind: &'static str,
}

impl<T> StreamCore<T> {
  pub(crate) fn new(kind: &'static str) -> Self {
    Self {
      subscribers: Rc::default(),
      disposables: Rc::default(),
      disposed: Cell::new(false),
      kind,
    }
  }

  #[inline]
  pub(crate) fn subscribe(&self, handler: Handler<T>) -> Subscription<T> {
    self.disposed.set(false);
    self.subscribers.add(handler)
  }

  #[inline]
  pub(crate) fn unsubscribe(&self, subscription: &Subscription<T>) {
    self.subscribers.remove(subscription)
  }

  #[inline]
  pub(crate) fn notify(&self, value: &T) {
    self.disposed.set(false);
    self.subscribers.notify(value)
  }

  #[inline]
  pub(crate) fn subscriber_count(&self) -> usize { self.subscribers.len() }

  #[inline]
  pub(crate) fn add_disposable(&self, item: impl Disposable + 'static) {
    self.disposables.add(Box::new(item))
  }

  /// Like `add_disposable`, but the caller may withdraw `item` again.
  #[inline]
  pub(crate) fn add_owned(&self, item: impl Disposable + 'static) -> OwnedEntry {
    OwnedEntry::new(&self.disposables, Box::new(item))
  }

  #[cfg(test)]
  pub(crate) fn owned_count(&self) -> usize { self.disposables.len() }

  /// True between a teardown and the next subscribe or notification.
  #[inline]
  pub(crate) fn is_disposed(&self) -> bool { self.disposed.get() }

  /// Subscriptions first, then owned resources in registration order.
  pub(crate) fn teardown(&self) {
    trace!(
      kind = self.kind,
      subscribers = self.subscribers.len(),
      disposables = self.disposables.len(),
      "stream disposed"
    );
    self.disposed.set(true);
    self.subscribers.dispose_all();
    self.disposables.dispose_all();
  }
}

impl<T> Drop for StreamCore<T> {
  fn drop(&mut self) { self.teardown() }
}
