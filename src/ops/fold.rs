use crate::prelude::*;
use std::cell::RefCell;

impl<T: Clone + 'static> EventStream<T> {
  /// Running accumulation: every value `v` turns the running state `acc`
  /// into `f(&acc, v)`, which is both emitted and kept for the next value.
  ///
  /// The running state belongs to this derived stream alone.
  pub fn fold<U, F>(&self, initial: U, f: F) -> EventStream<U>
  where
    U: Clone + 'static,
    F: Fn(&U, &T) -> U + 'static,
  {
    let running = RefCell::new(initial);
    self.map(move |v| accumulate(&running, &f, v))
  }
}

impl<T: Clone + 'static> ValueStream<T> {
  /// Running accumulation seeded with `initial`.
  ///
  /// Built on [`ValueStream::map`], so the current value is accumulated
  /// twice at construction: the starting value is
  /// `f(&f(&initial, &current), &current)`.
  pub fn fold<U, F>(&self, initial: U, f: F) -> ValueStream<U>
  where
    U: Clone + 'static,
    F: Fn(&U, &T) -> U + 'static,
  {
    let running = RefCell::new(initial);
    self.map(move |v| accumulate(&running, &f, v))
  }
}

fn accumulate<T, U: Clone>(running: &RefCell<U>, f: impl Fn(&U, &T) -> U, v: &T) -> U {
  let next = f(&running.borrow(), v);
  *running.borrow_mut() = next.clone();
  next
}
