use crate::prelude::*;

impl<T: Clone + 'static> EventStream<T> {
  /// Creates a stream that emits `f(v)` for every `v` this stream emits,
  /// starting with the current value if there is one.
  ///
  /// The new stream owns its subscription on `self`: disposing it detaches
  /// from this stream.
  pub fn map<U, F>(&self, f: F) -> EventStream<U>
  where
    U: Clone + 'static,
    F: Fn(&T) -> U + 'static,
  {
    let mapped = EventStream::new();
    let c_mapped = mapped.clone();
    mapped.add_disposable(self.subscribe(true, move |v| {
      c_mapped.trigger(f(v));
    }));
    mapped
  }
}

impl<T: Clone + 'static> ValueStream<T> {
  /// Creates a stream whose value is `f` of this stream's value.
  ///
  /// The initial value is computed right away. The subscription on `self`
  /// replays like every other operator, so `f` sees the current value twice
  /// at construction; after that every update is mapped and forwarded.
  pub fn map<U, F>(&self, f: F) -> ValueStream<U>
  where
    U: Clone + 'static,
    F: Fn(&T) -> U + 'static,
  {
    let mapped = ValueStream::new(f(&self.value()));
    let c_mapped = mapped.clone();
    mapped.add_disposable(self.subscribe(true, move |v| {
      c_mapped.update(f(v));
    }));
    mapped
  }
}
