use smallvec::SmallVec;
use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  rc::{Rc, Weak},
};

/// A resource with a single release operation.
///
/// Releasing more than once is always a no-op after the first call.
pub trait Disposable {
  /// Releases the resource.
  fn dispose(&self);

  /// Returns true if the resource has been released.
  fn is_disposed(&self) -> bool;
}

impl Debug for Box<dyn Disposable> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Box<dyn Disposable>")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

impl<T: ?Sized> Disposable for Box<T>
where
  T: Disposable,
{
  #[inline]
  fn dispose(&self) {
    let d = &**self;
    d.dispose()
  }

  #[inline]
  fn is_disposed(&self) -> bool {
    let d = &**self;
    d.is_disposed()
  }
}

/// Turns a one-shot teardown closure into a [`Disposable`].
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
///
/// use rxstream::prelude::*;
///
/// let hits = Rc::new(Cell::new(0));
/// let c_hits = hits.clone();
/// let d = DisposeFn::new(move || c_hits.set(c_hits.get() + 1));
/// d.dispose();
/// d.dispose();
/// assert_eq!(hits.get(), 1);
/// ```
pub struct DisposeFn(Cell<Option<Box<dyn FnOnce()>>>);

impl DisposeFn {
  pub fn new(teardown: impl FnOnce() + 'static) -> Self {
    Self(Cell::new(Some(Box::new(teardown))))
  }
}

impl Disposable for DisposeFn {
  fn dispose(&self) {
    if let Some(teardown) = self.0.take() {
      teardown();
    }
  }

  fn is_disposed(&self) -> bool {
    let teardown = self.0.take();
    let disposed = teardown.is_none();
    self.0.set(teardown);
    disposed
  }
}

impl Debug for DisposeFn {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DisposeFn")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// The ordered set of resources a stream owns.
///
/// Everything registered here is released together with the owner, in
/// registration order. Releasing drains the set, so an owner can keep
/// collecting children after it has been disposed once.
#[derive(Default)]
pub(crate) struct Disposables {
  items: RefCell<SmallVec<[(usize, Box<dyn Disposable>); 2]>>,
  next_key: Cell<usize>,
}

impl Disposables {
  #[inline]
  pub(crate) fn add(&self, item: Box<dyn Disposable>) { self.insert(item); }

  fn insert(&self, item: Box<dyn Disposable>) -> usize {
    let key = self.next_key.get();
    self.next_key.set(key.wrapping_add(1));
    self.items.borrow_mut().push((key, item));
    key
  }

  /// Takes the item registered under `key` out of the set without releasing
  /// it. Items already released or withdrawn are not found.
  fn remove(&self, key: usize) -> Option<Box<dyn Disposable>> {
    let mut items = self.items.borrow_mut();
    let idx = items.iter().position(|(k, _)| *k == key)?;
    Some(items.remove(idx).1)
  }

  #[inline]
  pub(crate) fn len(&self) -> usize { self.items.borrow().len() }

  /// Releases every item. Items may re-enter the owner while being released,
  /// so the set is detached before any of them runs.
  pub(crate) fn dispose_all(&self) {
    let items = std::mem::take(&mut *self.items.borrow_mut());
    for (_, item) in items {
      item.dispose();
    }
  }
}

/// An item owned by a [`Disposables`] set that its registrant can withdraw
/// again, for hooks that become pointless before their owner is released.
///
/// Holds the set weakly; withdrawing after the owner is gone does nothing.
pub(crate) struct OwnedEntry {
  set: Weak<Disposables>,
  key: usize,
}

impl OwnedEntry {
  pub(crate) fn new(set: &Rc<Disposables>, item: Box<dyn Disposable>) -> Self {
    Self { set: Rc::downgrade(set), key: set.insert(item) }
  }

  /// Drops the item without releasing it.
  pub(crate) fn withdraw(self) {
    if let Some(set) = self.set.upgrade() {
      // dropped after the set's borrow ends
      let stale = set.remove(self.key);
      drop(stale);
    }
  }
}
