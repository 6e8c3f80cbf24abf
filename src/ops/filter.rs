use crate::prelude::*;

impl<T: Clone + 'static> EventStream<T> {
  /// Creates a stream that emits only the values satisfying `predicate`.
  ///
  /// # Example
  ///
  /// ```rust
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// use rxstream::prelude::*;
  ///
  /// let stream = EventStream::new();
  /// let even = Rc::new(RefCell::new(vec![]));
  /// let c_even = even.clone();
  /// let _sub = stream
  ///   .filter(|v: &i32| v % 2 == 0)
  ///   .subscribe(false, move |v| c_even.borrow_mut().push(*v));
  ///
  /// for v in 0..5 {
  ///   stream.trigger(v);
  /// }
  /// assert_eq!(*even.borrow(), vec![0, 2, 4]);
  /// ```
  pub fn filter<F>(&self, predicate: F) -> EventStream<T>
  where
    F: Fn(&T) -> bool + 'static,
  {
    let filtered = EventStream::new();
    let c_filtered = filtered.clone();
    filtered.add_disposable(self.subscribe(true, move |v| {
      if predicate(v) {
        c_filtered.trigger(v.clone());
      }
    }));
    filtered
  }
}

impl<T: Clone + 'static> ValueStream<T> {
  /// Creates a stream that follows only the updates satisfying `predicate`.
  ///
  /// The new stream starts from this stream's current value whether or not
  /// it satisfies `predicate`: filtering applies to later updates only.
  pub fn filter<F>(&self, predicate: F) -> ValueStream<T>
  where
    F: Fn(&T) -> bool + 'static,
  {
    let filtered = ValueStream::new(self.value());
    let c_filtered = filtered.clone();
    filtered.add_disposable(self.subscribe(true, move |v| {
      if predicate(v) {
        c_filtered.update(v.clone());
      }
    }));
    filtered
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn forwards_matching_values() {
    let stream = EventStream::new();
    stream.trigger("2").trigger("2");
    let result = Rc::new(RefCell::new(vec![]));
    let c_result = result.clone();
    let sub = stream
      .filter(|v| *v == "2")
      .subscribe(false, move |v| c_result.borrow_mut().push(*v));
    stream
      .trigger("1")
      .trigger("2")
      .trigger("2")
      .trigger("3")
      .trigger("3")
      .trigger("3");
    assert_eq!(*result.borrow(), vec!["2", "2"]);
    sub.dispose();
  }

  #[test]
  fn replayed_value_is_filtered_too() {
    let stream = EventStream::new();
    stream.trigger(1);
    let odd_free = stream.filter(|v| v % 2 == 0);
    assert!(!odd_free.has_value());
    stream.trigger(2);
    assert_eq!(odd_free.value(), Some(2));
  }

  #[test]
  fn value_filter_keeps_starting_snapshot() {
    let stream = ValueStream::new(1);
    let even = stream.filter(|v| v % 2 == 0);
    assert_eq!(even.value(), 1);

    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    even.subscribe(true, move |v| c_seen.borrow_mut().push(*v));
    stream.update(3).update(4).update(5);
    assert_eq!(*seen.borrow(), vec![1, 4]);
    assert_eq!(even.value(), 4);
  }
}
