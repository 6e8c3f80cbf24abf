//! Wait operator implementation
//!
//! Bridges a stream into a single-resolution future: "wait until a value
//! satisfies this predicate".
//!
//! ## Behavior
//!
//! - **Match**: the first value (replayed or live) for which the predicate
//!   holds resolves the future with `Ok(value)`.
//! - **Disposed**: if the stream is disposed, or its last handle is dropped,
//!   before any value matched, the future resolves with
//!   `Err(WaitError::Disposed)`.
//! - The internal subscription and the teardown hook left on the stream are
//!   both released as soon as the wait settles.
//!
//! ## Examples
//!
//! ```rust
//! use futures::executor::block_on;
//! use rxstream::prelude::*;
//!
//! let stream = EventStream::new();
//! stream.trigger(0);
//! assert_eq!(block_on(stream.wait(true, |v| *v == 0)), Ok(0));
//!
//! let pending = stream.wait(false, |v| *v > 10);
//! stream.dispose();
//! assert_eq!(block_on(pending), Err(WaitError::Disposed));
//! ```

use std::{
  cell::RefCell,
  future::Future,
  pin::Pin,
  rc::Rc,
  task::{Context, Poll, Waker},
};

use futures::future::FusedFuture;
use tracing::debug;

use crate::{disposable::OwnedEntry, prelude::*};

// ============================================================================
// Shared State
// ============================================================================

enum Outcome<T> {
  Pending,
  Settled(WaitResult<T>),
  Taken,
}

/// Shared state between the [`Wait`] future and the stream side.
struct WaitState<T> {
  outcome: Outcome<T>,
  waker: Option<Waker>,
  subscription: Option<Subscription<T>>,
  hook: Option<OwnedEntry>,
}

impl<T> WaitState<T> {
  #[inline]
  fn is_pending(&self) -> bool { matches!(self.outcome, Outcome::Pending) }
}

/// Records the outcome once and releases the stream side.
fn settle<T>(state: &RefCell<WaitState<T>>, result: WaitResult<T>) {
  let (waker, subscription, hook) = {
    let mut state = state.borrow_mut();
    if !state.is_pending() {
      return;
    }
    state.outcome = Outcome::Settled(result);
    (state.waker.take(), state.subscription.take(), state.hook.take())
  };
  if let Some(subscription) = subscription {
    subscription.dispose();
  }
  if let Some(hook) = hook {
    hook.withdraw();
  }
  if let Some(waker) = waker {
    waker.wake();
  }
}

// ============================================================================
// Wait Future
// ============================================================================

/// A future that resolves with the first stream value satisfying a
/// predicate, or fails once the stream is disposed without a match.
///
/// Dropping a `Wait` does not unsubscribe; the wait ends when it matches or
/// when the stream goes away.
#[must_use = "futures do nothing unless polled"]
pub struct Wait<T> {
  state: Rc<RefCell<WaitState<T>>>,
}

impl<T> Future for Wait<T> {
  type Output = WaitResult<T>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let mut state = self.state.borrow_mut();
    match std::mem::replace(&mut state.outcome, Outcome::Taken) {
      Outcome::Settled(result) => Poll::Ready(result),
      outcome => {
        state.outcome = outcome;
        state.waker = Some(cx.waker().clone());
        Poll::Pending
      }
    }
  }
}

impl<T> FusedFuture for Wait<T> {
  fn is_terminated(&self) -> bool { matches!(self.state.borrow().outcome, Outcome::Taken) }
}

// ============================================================================
// Factory Function
// ============================================================================

/// Builds a [`Wait`] from a stream's `subscribe` and `add_owned`.
///
/// `subscribe` receives the handler to register and must return the
/// subscription; `own` receives the teardown hook the stream has to release
/// on disposal and returns the entry to withdraw it with.
fn stream_wait<T, P>(
  predicate: P,
  subscribe: impl FnOnce(Box<dyn Fn(&T)>) -> Subscription<T>,
  own: impl FnOnce(DisposeFn) -> OwnedEntry,
) -> Wait<T>
where
  T: Clone + 'static,
  P: Fn(&T) -> bool + 'static,
{
  let state = Rc::new(RefCell::new(WaitState {
    outcome: Outcome::Pending,
    waker: None,
    subscription: None,
    hook: None,
  }));

  let c_state = state.clone();
  let subscription = subscribe(Box::new(move |v: &T| {
    if c_state.borrow().is_pending() && predicate(v) {
      settle(&c_state, Ok(v.clone()));
    }
  }));

  // a replayed value may already have settled the wait
  if state.borrow().is_pending() {
    state.borrow_mut().subscription = Some(subscription);
    let c_state = state.clone();
    let hook = own(DisposeFn::new(move || {
      if c_state.borrow().is_pending() {
        debug!("stream disposed before wait predicate matched");
      }
      settle(&c_state, Err(WaitError::Disposed));
    }));
    state.borrow_mut().hook = Some(hook);
  } else {
    subscription.dispose();
  }

  Wait { state }
}

impl<T: Clone + 'static> EventStream<T> {
  /// Waits for the first value satisfying `predicate`; with `replay` the
  /// current value, if any, is considered too.
  pub fn wait<P>(&self, replay: bool, predicate: P) -> Wait<T>
  where
    P: Fn(&T) -> bool + 'static,
  {
    stream_wait(
      predicate,
      |handler| self.subscribe(replay, handler),
      |hook| self.add_owned(hook),
    )
  }
}

impl<T: Clone + 'static> ValueStream<T> {
  /// Waits for the first value satisfying `predicate`; with `replay` the
  /// current value is considered too.
  pub fn wait<P>(&self, replay: bool, predicate: P) -> Wait<T>
  where
    P: Fn(&T) -> bool + 'static,
  {
    stream_wait(
      predicate,
      |handler| self.subscribe(replay, handler),
      |hook| self.add_owned(hook),
    )
  }
}

// ============================================================================
// Tests
// ============================================================================
