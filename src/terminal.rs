//! # Terminal Operations
//!
//! Operations that force evaluation of a [`Pipeline`].
//!
//! Each call replays the whole chain exactly once over a fresh copy of the
//! original elements and then applies its own logic. Nothing is cached:
//! calling the same terminal twice replays the chain twice.
//!
//! The concurrent `for_each_async` family lives in [`crate::parallel`].

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use tracing::debug;

impl<V: Clone> Pipeline<V> {
  /// Evaluates the pipeline and returns the resulting elements.
  pub fn get(&self) -> Vec<V> {
    self.evaluate()
  }

  /// Number of elements after evaluation.
  pub fn count(&self) -> usize {
    self.evaluate().len()
  }

  /// First element after evaluation, or `None` when empty.
  pub fn first(&self) -> Option<V> {
    self.evaluate().into_iter().next()
  }

  /// Last element after evaluation, or `None` when empty.
  pub fn last(&self) -> Option<V> {
    self.evaluate().pop()
  }

  /// First element matching `pred`, with its index.
  pub fn first_by<F>(&self, mut pred: F) -> Option<(usize, V)>
  where
    F: FnMut(usize, &V) -> bool,
  {
    self
      .evaluate()
      .into_iter()
      .enumerate()
      .find(|(i, v)| pred(*i, v))
  }

  /// Last element matching `pred`, with its index.
  pub fn last_by<F>(&self, mut pred: F) -> Option<(usize, V)>
  where
    F: FnMut(usize, &V) -> bool,
  {
    self
      .evaluate()
      .into_iter()
      .enumerate()
      .rev()
      .find(|(i, v)| pred(*i, v))
  }

  /// `true` if every element matches; `true` for an empty pipeline.
  pub fn all_match<F>(&self, mut pred: F) -> bool
  where
    F: FnMut(usize, &V) -> bool,
  {
    self.evaluate().iter().enumerate().all(|(i, v)| pred(i, v))
  }

  /// `true` if any element matches; `false` for an empty pipeline.
  pub fn any_match<F>(&self, mut pred: F) -> bool
  where
    F: FnMut(usize, &V) -> bool,
  {
    self.evaluate().iter().enumerate().any(|(i, v)| pred(i, v))
  }

  /// `true` if no element matches; `true` for an empty pipeline.
  pub fn none_match<F>(&self, pred: F) -> bool
  where
    F: FnMut(usize, &V) -> bool,
  {
    !self.any_match(pred)
  }

  /// Calls `f(index, value)` for each element in order.
  ///
  /// Stops at the first failing call and returns its error.
  ///
  /// ```rust
  /// use seqweave::{Pipeline, PipelineError};
  ///
  /// let mut seen = Vec::new();
  /// let result = Pipeline::new(vec![1, 2, 3, 4]).for_each(|i, v| {
  ///   if *v == 3 {
  ///     return Err("three");
  ///   }
  ///   seen.push((i, *v));
  ///   Ok(())
  /// });
  ///
  /// assert_eq!(result, Err(PipelineError::Callback { index: 2, error: "three" }));
  /// assert_eq!(seen, vec![(0, 1), (1, 2)]);
  /// ```
  pub fn for_each<F, E>(&self, mut f: F) -> Result<(), PipelineError<E>>
  where
    F: FnMut(usize, &V) -> Result<(), E>,
  {
    let values = self.evaluate();
    for (i, v) in values.iter().enumerate() {
      f(i, v).map_err(|e| PipelineError::callback(i, e))?;
    }
    Ok(())
  }

  /// Calls `f(from, to, chunk)` for each run of `chunk_size` elements.
  ///
  /// Chunks are contiguous and visited in order; the last one may be
  /// shorter. Stops at the first failing call. A `chunk_size` of zero is
  /// rejected before the pipeline is evaluated.
  pub fn for_each_chunk<F, E>(&self, chunk_size: usize, mut f: F) -> Result<(), PipelineError<E>>
  where
    F: FnMut(usize, usize, &[V]) -> Result<(), E>,
  {
    if chunk_size == 0 {
      return Err(PipelineError::InvalidChunkSize(chunk_size));
    }
    let values = self.evaluate();
    debug!(
      pipeline = self.config().label(),
      chunk_size,
      chunks = values.len().div_ceil(chunk_size),
      "iterating chunks"
    );
    for (n, chunk) in values.chunks(chunk_size).enumerate() {
      let from = n * chunk_size;
      f(from, from + chunk.len(), chunk).map_err(|e| PipelineError::callback(from, e))?;
    }
    Ok(())
  }
}

impl<V: Clone> IntoIterator for &Pipeline<V> {
  type Item = V;
  type IntoIter = std::vec::IntoIter<V>;

  fn into_iter(self) -> Self::IntoIter {
    self.evaluate().into_iter()
  }
}
