//! Derived streams.
//!
//! Every operator builds a **new** stream that subscribes to its source with
//! replay and owns that subscription: disposing the derived stream detaches
//! it from the source. The handler registered on the source is what keeps a
//! derived stream alive, so chains survive dropping their intermediate
//! handles.
//!
//! Each operator comes in an [`EventStream`](crate::event_stream::EventStream)
//! and a [`ValueStream`](crate::value_stream::ValueStream) flavor; they differ
//! only in how the starting value is chosen.
pub mod combine;
pub mod distinct;
pub mod filter;
pub mod fold;
pub mod map;
pub mod take;
pub mod wait;
