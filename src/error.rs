//! # Error Handling
//!
//! Errors reported by terminal operations.
//!
//! Only the iterating terminals can fail. A failure either comes from the
//! caller's own callback, which is carried through untouched together with
//! the index it failed at, or from an argument the library rejects before
//! evaluating anything. "Nothing found" results such as an empty
//! [`first`](crate::Pipeline::first) are `None`, never errors.

use thiserror::Error;

/// Error returned by the `for_each*` terminals.
///
/// `E` is the caller's callback error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError<E> {
  /// A chunk size of zero was requested.
  #[error("chunk size must be positive, got {0}")]
  InvalidChunkSize(usize),
  /// A callback failed.
  ///
  /// For per-element terminals `index` is the element's position in the
  /// evaluated sequence; for chunked terminals it is the chunk's start.
  #[error("callback failed at index {index}: {error}")]
  Callback {
    /// Position of the failing element or chunk.
    index: usize,
    /// The error returned by the callback.
    error: E,
  },
  /// A dedicated worker pool could not be created.
  #[error("worker pool error: {0}")]
  WorkerPool(String),
}

impl<E> From<rayon::ThreadPoolBuildError> for PipelineError<E> {
  fn from(err: rayon::ThreadPoolBuildError) -> Self {
    Self::WorkerPool(err.to_string())
  }
}

impl<E> PipelineError<E> {
  pub(crate) fn callback(index: usize, error: E) -> Self {
    Self::Callback { index, error }
  }

  /// Returns the callback's own error, if this is a callback failure.
  pub fn into_callback_error(self) -> Option<E> {
    match self {
      Self::Callback { error, .. } => Some(error),
      _ => None,
    }
  }

  /// Returns `true` if the library rejected its input before evaluating.
  pub fn is_invalid_argument(&self) -> bool {
    matches!(self, Self::InvalidChunkSize(_))
  }
}
