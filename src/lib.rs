//! # rxstream: push-based reactive values
//!
//! A stream holds zero or one current value and synchronously notifies its
//! subscribers whenever the value changes.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxstream::prelude::*;
//!
//! let clicks = EventStream::new();
//! let total = Rc::new(RefCell::new(0));
//! let c_total = total.clone();
//!
//! let _sub = clicks
//!   .filter(|n: &u32| *n > 0)
//!   .fold(0, |acc, n| acc + n)
//!   .subscribe(true, move |sum| *c_total.borrow_mut() = *sum);
//!
//! clicks.trigger(1).trigger(0).trigger(2);
//! assert_eq!(*total.borrow(), 3);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EventStream`] | Value absent until the first `trigger` |
//! | [`ValueStream`] | Value always present, seeded at construction |
//! | [`Subscription`] | Handle binding one handler to one stream |
//! | [`Disposable`] | Anything with an idempotent `dispose` |
//! | [`Wait`] | Future resolving on the first value matching a predicate |
//!
//! ## Replay
//!
//! `subscribe(replay, handler)` decides whether the handler sees the value
//! already held by the stream. A derived stream starts from whatever its
//! source holds when the operator is applied.
//!
//! ## Dispatch
//!
//! Dispatch is single-threaded and depth-first: a trigger fired from inside a
//! handler completes before the outer notification pass moves on. Handlers may
//! subscribe, unsubscribe or dispose while a pass is running; the pass works
//! on the subscribers active when it started and skips any disposed since.
//!
//! ## Teardown
//!
//! A derived stream owns the subscription it holds on its source. Disposing a
//! stream detaches its subscribers and releases what it owns, in registration
//! order. Dropping the last handle of a stream does the same.
//!
//! [`EventStream`]: event_stream::EventStream
//! [`ValueStream`]: value_stream::ValueStream
//! [`Subscription`]: subscription::Subscription
//! [`Disposable`]: disposable::Disposable
//! [`Wait`]: ops::wait::Wait

pub mod disposable;
pub mod error;
pub mod event_stream;
pub mod ops;
pub mod prelude;
mod stream_core;
pub mod subscription;
pub mod value_stream;

pub use prelude::*;
