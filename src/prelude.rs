//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

pub use crate::{
  disposable::{Disposable, DisposeFn},
  error::{WaitError, WaitResult},
  event_stream::EventStream,
  ops::{
    combine::{combine, combine2, combine2_values, Combine},
    wait::Wait,
  },
  subscription::Subscription,
  value_stream::ValueStream,
};
