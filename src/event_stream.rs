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

/// A reactive container whose value is absent until it is first triggered.
///
/// Every [`trigger`](EventStream::trigger) stores the value and synchronously
/// notifies the active subscribers in subscription order. A subscriber that
/// asks for replay receives the stored value immediately, if there is one.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxstream::prelude::*;
///
/// let stream = EventStream::new();
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
///
/// stream.trigger(0);
/// let sub = stream.subscribe(true, move |v: &i32| c_seen.borrow_mut().push(*v));
/// stream.trigger(1).trigger(2);
/// sub.dispose();
/// stream.trigger(3);
///
/// assert_eq!(*seen.borrow(), vec![0, 1, 2]);
/// ```
///
/// Cloning an `EventStream` yields another handle to the same stream.
pub struct EventStream<T>(Rc<EventInner<T>>);

pub(crate) struct EventInner<T> {
  core: StreamCore<T>,
  value: RefCell<Option<T>>,
}

/// Non-owning handle used by operators that read a stream they must not keep
/// alive.
pub(crate) struct WeakEventStream<T>(Weak<EventInner<T>>);

impl<T> WeakEventStream<T> {
  #[inline]
  pub(crate) fn upgrade(&self) -> Option<EventStream<T>> { self.0.upgrade().map(EventStream) }
}

impl<T: Clone + 'static> EventStream<T> {
  pub fn new() -> Self {
    Self(Rc::new(EventInner {
      core: StreamCore::new("event"),
      value: RefCell::new(None),
    }))
  }

  /// Registers `handler` after every existing subscriber.
  ///
  /// With `replay` set and a value present, the handler is invoked with that
  /// value before this returns.
  pub fn subscribe(&self, replay: bool, handler: impl Fn(&T) + 'static) -> Subscription<T> {
    let handler: Rc<dyn Fn(&T)> = Rc::new(handler);
    let subscription = self.0.core.subscribe(handler.clone());
    if replay {
      if let Some(value) = self.value() {
        handler(&value);
      }
    }
    subscription
  }

  /// Removes `subscription` from the active set; a no-op if it is not there.
  #[inline]
  pub fn unsubscribe(&self, subscription: &Subscription<T>) {
    self.0.core.unsubscribe(subscription)
  }

  /// Stores `value` and notifies every active subscriber once.
  pub fn trigger(&self, value: T) -> &Self {
    let stale = self.0.value.replace(Some(value.clone()));
    drop(stale);
    self.0.core.notify(&value);
    self
  }

  /// Calls `f` with the current value, if there is one.
  pub fn last(&self, f: impl FnOnce(&T)) {
    if let Some(value) = self.value() {
      f(&value);
    }
  }

  #[inline]
  pub fn value(&self) -> Option<T> { self.0.value.borrow().clone() }

  #[inline]
  pub fn has_value(&self) -> bool { self.0.value.borrow().is_some() }

  #[inline]
  pub fn subscriber_count(&self) -> usize { self.0.core.subscriber_count() }

  /// Hands `item` to this stream; it is released when the stream is disposed.
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

  /// Detaches every subscriber, releases every owned resource and forgets the
  /// current value. The stream stays usable afterwards.
  pub fn dispose(&self) {
    self.0.core.teardown();
    let stale = self.0.value.take();
    drop(stale);
  }

  #[inline]
  pub(crate) fn downgrade(&self) -> WeakEventStream<T> { WeakEventStream(Rc::downgrade(&self.0)) }
}

impl<T: Clone + 'static> Default for EventStream<T> {
  fn default() -> Self { Self::new() }
}

impl<T: Clone + 'static> Disposable for EventStream<T> {
  #[inline]
  fn dispose(&self) { EventStream::dispose(self) }

  /// A disposed stream stays usable; it stops counting as disposed on the
  /// next `subscribe` or `trigger`.
  #[inline]
  fn is_disposed(&self) -> bool { self.0.core.is_disposed() }
}

impl<T> Clone for EventStream<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Debug for EventStream<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EventStream")
      .field("has_value", &self.0.value.borrow().is_some())
      .field("subscribers", &self.0.core.subscriber_count())
      .finish()
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::disposable::DisposeFn;
  use std::cell::Cell;

  fn collect<T: Clone + 'static>(
    stream: &EventStream<T>,
    replay: bool,
  ) -> (Rc<RefCell<Vec<T>>>, Subscription<T>) {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let sub = stream.subscribe(replay, move |v: &T| c_seen.borrow_mut().push(v.clone()));
    (seen, sub)
  }

  #[test]
  fn subscribe_simple() {
    let stream = EventStream::new();
    let (seen, sub) = collect(&stream, false);
    stream.trigger("ciao");
    stream.trigger("mondo");
    assert_eq!(seen.borrow().last(), Some(&"mondo"));
    sub.dispose();
  }

  #[test]
  fn unsubscribe_simple() {
    let stream = EventStream::new();
    let (seen, sub) = collect(&stream, false);
    stream.trigger("ciao");
    stream.unsubscribe(&sub);
    stream.trigger("mondo");
    assert_eq!(*seen.borrow(), vec!["ciao"]);
    sub.dispose();
    stream.unsubscribe(&sub);
  }

  #[test]
  fn unit_values_still_notify() {
    let stream = EventStream::<()>::new();
    let called = Rc::new(Cell::new(false));
    let c_called = called.clone();
    let sub = stream.subscribe(false, move |_| c_called.set(true));
    stream.trigger(());
    assert!(called.get());
    sub.dispose();
  }

  #[test]
  fn last_only_with_value() {
    let stream = EventStream::new();
    let hits = Cell::new(0);
    stream.last(|_| hits.set(hits.get() + 1));
    assert_eq!(hits.get(), 0);
    stream.trigger("1");
    assert!(stream.has_value());
    stream.last(|v| {
      assert_eq!(*v, "1");
      hits.set(hits.get() + 1);
    });
    assert_eq!(hits.get(), 1);
  }

  #[test]
  fn no_replay_without_request() {
    let stream = EventStream::new();
    stream.trigger(7);
    let (seen, _sub) = collect(&stream, false);
    assert!(seen.borrow().is_empty());
  }

  #[test]
  fn replay_only_when_value_present() {
    let stream = EventStream::new();
    let (before, _s1) = collect(&stream, true);
    assert!(before.borrow().is_empty());

    stream.trigger(0);
    let (after, _s2) = collect(&stream, true);
    assert_eq!(*after.borrow(), vec![0]);

    stream.trigger(1).trigger(2);
    assert_eq!(*before.borrow(), vec![0, 1, 2]);
    assert_eq!(*after.borrow(), vec![0, 1, 2]);
  }

  #[test]
  fn subscription_dispose() {
    let stream = EventStream::new();
    stream.trigger(0);
    let (seen, sub) = collect(&stream, true);
    stream.trigger(1);
    sub.dispose();
    stream.trigger(2);
    assert_eq!(*seen.borrow(), vec![0, 1]);
  }

  #[test]
  fn notify_in_subscription_order() {
    let stream = EventStream::new();
    let order = Rc::new(RefCell::new(vec![]));
    let subs: Vec<_> = (0..3)
      .map(|i| {
        let c_order = order.clone();
        stream.subscribe(false, move |_: &i32| c_order.borrow_mut().push(i))
      })
      .collect();
    stream.trigger(0);
    assert_eq!(*order.borrow(), vec![0, 1, 2]);
    assert_eq!(subs.len(), 3);
  }

  #[test]
  fn dispose_clears_everything() {
    let stream = EventStream::new();
    let released = Rc::new(Cell::new(0));
    let c_released = released.clone();
    stream.add_disposable(DisposeFn::new(move || c_released.set(c_released.get() + 1)));
    let (seen, sub) = collect(&stream, false);
    stream.trigger(1);

    stream.dispose();
    assert!(!stream.has_value());
    assert!(sub.is_disposed());
    assert_eq!(stream.subscriber_count(), 0);
    assert_eq!(released.get(), 1);

    stream.dispose();
    assert_eq!(released.get(), 1);

    // still usable, but the old subscriber is gone
    stream.trigger(2);
    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(stream.value(), Some(2));
  }

  #[test]
  fn dispose_self_from_handler() {
    let stream = EventStream::new();
    let me: Rc<RefCell<Option<Subscription<i32>>>> = Rc::default();
    let c_me = me.clone();
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    *me.borrow_mut() = Some(stream.subscribe(false, move |_| {
      c_hits.set(c_hits.get() + 1);
      if let Some(sub) = c_me.borrow().as_ref() {
        sub.dispose();
      }
    }));
    let (seen, _other) = collect(&stream, false);

    stream.trigger(1).trigger(2);
    assert_eq!(hits.get(), 1);
    assert_eq!(*seen.borrow(), vec![1, 2]);
  }

  #[test]
  fn reentrant_trigger_is_depth_first() {
    let stream = EventStream::new();
    let order = Rc::new(RefCell::new(vec![]));
    let weak = stream.downgrade();
    let c_order = order.clone();
    stream.subscribe(false, move |v: &i32| {
      c_order.borrow_mut().push(format!("a{v}"));
      if *v == 1 {
        if let Some(stream) = weak.upgrade() {
          stream.trigger(2);
        }
      }
    });
    let c_order = order.clone();
    stream.subscribe(false, move |v: &i32| c_order.borrow_mut().push(format!("b{v}")));

    stream.trigger(1);
    assert_eq!(*order.borrow(), vec!["a1", "a2", "b2", "b1"]);
    assert_eq!(stream.value(), Some(2));
  }

  #[test]
  fn drop_last_handle_releases_owned() {
    let released = Rc::new(Cell::new(false));
    let c_released = released.clone();
    let stream = EventStream::<i32>::new();
    stream.add_disposable(DisposeFn::new(move || c_released.set(true)));
    let (_, sub) = collect(&stream, false);
    drop(stream);
    assert!(released.get());
    assert!(sub.is_disposed());
  }

  #[test]
  fn disposed_until_used_again() {
    let stream = EventStream::<i32>::new();
    assert!(!Disposable::is_disposed(&stream));
    stream.dispose();
    assert!(Disposable::is_disposed(&stream));
    stream.trigger(1);
    assert!(!Disposable::is_disposed(&stream));
    stream.dispose();
    let _sub = stream.subscribe(false, |_| {});
    assert!(!Disposable::is_disposed(&stream));
  }
}
