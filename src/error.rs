/// Why a [`Wait`](crate::ops::wait::Wait) finished without a value.
///
/// A rejected wait will never resolve; it is not worth retrying on the same
/// stream state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WaitError {
  /// The stream was disposed (or dropped) before any value matched.
  #[error("stream disposed before predicate satisfied")]
  Disposed,
}

/// The output of awaiting a [`Wait`](crate::ops::wait::Wait).
pub type WaitResult<T> = Result<T, WaitError>;
