//! Combine operator implementation
//!
//! Derives one tuple-valued stream from 2 to 6 sources of possibly different
//! element types. The arity is part of the type: [`Combine`] is implemented
//! for tuples of streams, so a wrong number of sources fails to compile.
//!
//! ## Emission
//!
//! - **Event streams**: nothing is emitted until every source holds a value.
//!   From then on, any source trigger emits the tuple of every source's latest
//!   value.
//! - **Value streams**: the combined stream starts from the tuple of the
//!   current values and updates on every source update.
//!
//! ## Lifetime
//!
//! Each source gets a teardown hook that counts down once when that source
//! is disposed (or dropped). The combined stream disposes itself when the
//! last source is gone; a single source going away does not end it.
//! Disposing the combined stream first withdraws the hooks it left on the
//! sources.
//!
//! ## Example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxstream::prelude::*;
//!
//! let a = EventStream::new();
//! let b = EventStream::new();
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! let _sub = combine((a.clone(), b.clone()))
//!   .subscribe(false, move |v: &(i32, char)| c_seen.borrow_mut().push(*v));
//!
//! a.trigger(1);
//! b.trigger('x');
//! a.trigger(2);
//! assert_eq!(*seen.borrow(), vec![(1, 'x'), (2, 'x')]);
//! ```

use crate::{disposable::OwnedEntry, prelude::*};
use std::{cell::Cell, rc::Rc};
use tracing::trace;

/// A fixed-size group of sources that can be merged into one stream of
/// tuples.
pub trait Combine {
  type Output;

  fn combine(self) -> Self::Output;
}

/// Combines a tuple of 2 to 6 event streams, or of 2 to 6 value streams.
#[inline]
pub fn combine<S: Combine>(sources: S) -> S::Output { sources.combine() }

/// Binary [`combine`] of two event streams.
pub fn combine2<A, B>(a: &EventStream<A>, b: &EventStream<B>) -> EventStream<(A, B)>
where
  A: Clone + 'static,
  B: Clone + 'static,
{
  (a.clone(), b.clone()).combine()
}

/// Binary [`combine`] of two value streams.
pub fn combine2_values<A, B>(a: &ValueStream<A>, b: &ValueStream<B>) -> ValueStream<(A, B)>
where
  A: Clone + 'static,
  B: Clone + 'static,
{
  (a.clone(), b.clone()).combine()
}

/// Teardown hook placed on each source; the last one to fire disposes the
/// combined stream.
fn joint_lifetime(remaining: &Rc<Cell<usize>>, combined: impl Disposable + 'static) -> DisposeFn {
  let remaining = remaining.clone();
  DisposeFn::new(move || {
    remaining.set(remaining.get() - 1);
    if remaining.get() == 0 {
      trace!("every combined source disposed");
      combined.dispose();
    }
  })
}

/// Owned by the combined stream: takes its hook back off a source.
#[inline]
fn withdraw_on_dispose(entry: OwnedEntry) -> DisposeFn {
  DisposeFn::new(move || entry.withdraw())
}

macro_rules! impl_combine {
  ($n:expr; $($T:ident $source:ident $value:ident),+) => {
    impl<$($T),+> Combine for ($(EventStream<$T>,)+)
    where
      $($T: Clone + 'static),+
    {
      type Output = EventStream<($($T,)+)>;

      fn combine(self) -> Self::Output {
        let ($($source,)+) = self;
        let combined = EventStream::new();
        let emit: Rc<dyn Fn()> = {
          let combined = combined.clone();
          $(let $source = $source.downgrade();)+
          Rc::new(move || {
            $(
              let Some($value) = $source.upgrade().and_then(|s| s.value()) else { return };
            )+
            combined.trigger(($($value,)+));
          })
        };
        let remaining = Rc::new(Cell::new($n));
        $(
          let c_emit = emit.clone();
          combined.add_disposable($source.subscribe(true, move |_| c_emit()));
          let hook = $source.add_owned(joint_lifetime(&remaining, combined.clone()));
          combined.add_disposable(withdraw_on_dispose(hook));
        )+
        combined
      }
    }

    impl<$($T),+> Combine for ($(ValueStream<$T>,)+)
    where
      $($T: Clone + 'static),+
    {
      type Output = ValueStream<($($T,)+)>;

      fn combine(self) -> Self::Output {
        let ($($source,)+) = self;
        let combined = ValueStream::new(($($source.value(),)+));
        let update: Rc<dyn Fn()> = {
          let combined = combined.clone();
          $(let $source = $source.downgrade();)+
          Rc::new(move || {
            $(
              let Some($value) = $source.upgrade().map(|s| s.value()) else { return };
            )+
            combined.update(($($value,)+));
          })
        };
        let remaining = Rc::new(Cell::new($n));
        $(
          let c_update = update.clone();
          combined.add_disposable($source.subscribe(false, move |_| c_update()));
          let hook = $source.add_owned(joint_lifetime(&remaining, combined.clone()));
          combined.add_disposable(withdraw_on_dispose(hook));
        )+
        combined
      }
    }
  };
}

impl_combine!(2; A a va, B b vb);
impl_combine!(3; A a va, B b vb, C c vc);
impl_combine!(4; A a va, B b vb, C c vc, D d vd);
impl_combine!(5; A a va, B b vb, C c vc, D d vd, E e ve);
impl_combine!(6; A a va, B b vb, C c vc, D d vd, E e ve, F f vf);
