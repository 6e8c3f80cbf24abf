use crate::prelude::*;
use std::cell::Cell;
use tracing::trace;

/// Shared cutoff for both stream kinds: forward while `count <= limit`.
///
/// The comparison is inclusive, so `limit + 1` values go through before the
/// derived stream gives up.
fn admit(count: &Cell<usize>, limit: usize) -> bool {
  if count.get() <= limit {
    count.set(count.get() + 1);
    true
  } else {
    trace!(limit, "take limit exceeded, disposing derived stream");
    false
  }
}

impl<T: Clone + 'static> EventStream<T> {
  /// Forwards values (the replayed current value included) until `limit + 1`
  /// of them went through. The next value disposes the derived stream, which
  /// detaches it from `self`.
  ///
  /// ```rust
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// use rxstream::prelude::*;
  ///
  /// let stream = EventStream::new();
  /// let seen = Rc::new(RefCell::new(vec![]));
  /// let c_seen = seen.clone();
  /// let _sub = stream
  ///   .take(1)
  ///   .subscribe(false, move |v: &i32| c_seen.borrow_mut().push(*v));
  /// for v in 0..5 {
  ///   stream.trigger(v);
  /// }
  /// assert_eq!(*seen.borrow(), vec![0, 1]);
  /// ```
  pub fn take(&self, limit: usize) -> EventStream<T> {
    let taken = EventStream::new();
    let c_taken = taken.clone();
    let count = Cell::new(0);
    taken.add_disposable(self.subscribe(true, move |v| {
      if admit(&count, limit) {
        c_taken.trigger(v.clone());
      } else {
        c_taken.dispose();
      }
    }));
    taken
  }
}

impl<T: Clone + 'static> ValueStream<T> {
  /// Starts from this stream's value and follows it until `limit + 1` values
  /// (the replayed current value included) went through; the next update
  /// disposes the derived stream.
  pub fn take(&self, limit: usize) -> ValueStream<T> {
    let taken = ValueStream::new(self.value());
    let c_taken = taken.clone();
    let count = Cell::new(0);
    taken.add_disposable(self.subscribe(true, move |v| {
      if admit(&count, limit) {
        c_taken.update(v.clone());
      } else {
        c_taken.dispose();
      }
    }));
    taken
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  fn run(limit: usize, replay: bool) -> Vec<&'static str> {
    let stream = EventStream::new();
    stream.trigger("2").trigger("2");
    let result = Rc::new(RefCell::new(vec![]));
    let c_result = result.clone();
    let sub = stream
      .take(limit)
      .subscribe(replay, move |v| c_result.borrow_mut().push(*v));
    stream
      .trigger("1")
      .trigger("2")
      .trigger("2")
      .trigger("3")
      .trigger("3")
      .trigger("3");
    sub.dispose();
    let result = result.borrow().clone();
    result
  }

  #[test]
  fn take_without_replay() {
    // the replayed "2" was consumed before the subscriber arrived
    assert_eq!(run(3, false), vec!["1", "2", "2"]);
  }

  #[test]
  fn take_with_replay() {
    assert_eq!(run(3, true), vec!["2", "1", "2", "2"]);
  }

  #[test]
  fn take_many() {
    assert_eq!(run(300, true), vec!["2", "1", "2", "2", "3", "3", "3"]);
  }

  #[test]
  fn forwards_limit_plus_one_then_detaches() {
    let stream = EventStream::new();
    let taken = stream.take(3);
    let result = Rc::new(RefCell::new(vec![]));
    let c_result = result.clone();
    let sub = taken.subscribe(false, move |v| c_result.borrow_mut().push(*v));
    for v in ["1", "2", "2", "3", "3", "3"] {
      stream.trigger(v);
    }
    assert_eq!(*result.borrow(), vec!["1", "2", "2", "3"]);
    assert!(sub.is_disposed());
    assert_eq!(stream.subscriber_count(), 0);
    assert!(!taken.has_value());
  }

  #[test]
  fn value_take_counts_replayed_value() {
    let stream = ValueStream::new(0);
    let taken = stream.take(1);
    let result = Rc::new(RefCell::new(vec![]));
    let c_result = result.clone();
    taken.subscribe(false, move |v| c_result.borrow_mut().push(*v));
    stream.update(1).update(2).update(3);
    assert_eq!(*result.borrow(), vec![1]);
    assert_eq!(taken.value(), 1);
    assert_eq!(stream.subscriber_count(), 0);
  }
}
