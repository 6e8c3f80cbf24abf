use crate::prelude::*;

impl<T: Clone + 'static> EventStream<T> {
  /// Creates a stream that drops a value when its key equals the key of the
  /// last value the new stream emitted.
  ///
  /// Until the new stream has emitted anything, every value passes.
  pub fn distinct<K, F>(&self, key: F) -> EventStream<T>
  where
    K: PartialEq,
    F: Fn(&T) -> K + 'static,
  {
    let distinct = EventStream::new();
    let c_distinct = distinct.clone();
    distinct.add_disposable(self.subscribe(true, move |v| {
      let changed = c_distinct.value().map_or(true, |last| key(&last) != key(v));
      if changed {
        c_distinct.trigger(v.clone());
      }
    }));
    distinct
  }

  /// [`distinct`](EventStream::distinct) keyed on the value itself.
  pub fn distinct_simple(&self) -> EventStream<T>
  where
    T: PartialEq,
  {
    self.distinct(T::clone)
  }
}

impl<T: Clone + 'static> ValueStream<T> {
  /// Creates a stream that starts from this stream's value and drops any
  /// update whose key equals the key of its own current value.
  pub fn distinct<K, F>(&self, key: F) -> ValueStream<T>
  where
    K: PartialEq,
    F: Fn(&T) -> K + 'static,
  {
    let distinct = ValueStream::new(self.value());
    let c_distinct = distinct.clone();
    distinct.add_disposable(self.subscribe(true, move |v| {
      if key(&c_distinct.value()) != key(v) {
        c_distinct.update(v.clone());
      }
    }));
    distinct
  }

  /// [`distinct`](ValueStream::distinct) keyed on the value itself.
  pub fn distinct_simple(&self) -> ValueStream<T>
  where
    T: PartialEq,
  {
    self.distinct(T::clone)
  }
}
