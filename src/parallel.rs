//! # Concurrent Terminals
//!
//! `for_each_async` and `for_each_chunk_async` hand every element (or every
//! chunk) to a rayon worker group and wait for all of them.
//!
//! ## Failure semantics
//!
//! - Every task runs to completion, even after another task has failed.
//!   There is no cancellation.
//! - Once all tasks are joined, a single representative failure is
//!   returned: the one with the lowest element index (or chunk start).
//! - Callback completion order is unspecified. Only the partitioning into
//!   elements or chunks is deterministic.
//!
//! Callbacks receive shared, read-only views of the evaluated buffer. Any
//! shared state they mutate must be synchronized by the caller.
//!
//! ## Worker group
//!
//! By default tasks run on rayon's global pool. A pipeline configured with
//! [`with_parallelism`](Pipeline::with_parallelism) gets a dedicated pool of
//! that many threads for the duration of the call.

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use rayon::prelude::*;
use tracing::{debug, warn};

impl<V: Clone + Sync> Pipeline<V> {
  /// Calls `f(index, value)` for every element concurrently.
  ///
  /// ```rust
  /// use seqweave::Pipeline;
  /// use std::sync::atomic::{AtomicUsize, Ordering};
  ///
  /// let sum = AtomicUsize::new(0);
  /// Pipeline::new(vec![1, 2, 3, 4])
  ///   .for_each_async(|_, v| {
  ///     sum.fetch_add(*v, Ordering::SeqCst);
  ///     Ok::<_, String>(())
  ///   })
  ///   .unwrap();
  /// assert_eq!(sum.into_inner(), 10);
  /// ```
  pub fn for_each_async<F, E>(&self, f: F) -> Result<(), PipelineError<E>>
  where
    F: Fn(usize, &V) -> Result<(), E> + Sync,
    E: Send,
  {
    let values = self.evaluate();
    debug!(
      pipeline = self.config().label(),
      tasks = values.len(),
      "spawning element tasks"
    );
    let failures = self.run_workers(|| {
      values
        .par_iter()
        .enumerate()
        .filter_map(|(i, v)| f(i, v).err().map(|e| (i, e)))
        .collect::<Vec<_>>()
    })?;
    self.first_failure(failures, values.len())
  }

  /// Calls `f(from, to, chunk)` for every chunk of `chunk_size` elements
  /// concurrently.
  ///
  /// Partitioning matches [`for_each_chunk`](Pipeline::for_each_chunk). A
  /// `chunk_size` of zero is rejected before the pipeline is evaluated.
  pub fn for_each_chunk_async<F, E>(&self, chunk_size: usize, f: F) -> Result<(), PipelineError<E>>
  where
    F: Fn(usize, usize, &[V]) -> Result<(), E> + Sync,
    E: Send,
  {
    if chunk_size == 0 {
      return Err(PipelineError::InvalidChunkSize(chunk_size));
    }
    let values = self.evaluate();
    let chunks = values.len().div_ceil(chunk_size);
    debug!(
      pipeline = self.config().label(),
      chunk_size,
      tasks = chunks,
      "spawning chunk tasks"
    );
    let failures = self.run_workers(|| {
      values
        .par_chunks(chunk_size)
        .enumerate()
        .filter_map(|(n, chunk)| {
          let from = n * chunk_size;
          f(from, from + chunk.len(), chunk).err().map(|e| (from, e))
        })
        .collect::<Vec<_>>()
    })?;
    self.first_failure(failures, chunks)
  }

  fn run_workers<R, J>(&self, job: J) -> Result<R, ThreadPoolBuildError>
  where
    J: FnOnce() -> R + Send,
    R: Send,
  {
    match self.config().parallelism() {
      None => Ok(job()),
      Some(threads) => {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(pool.install(job))
      }
    }
  }

  fn first_failure<E>(&self, failures: Vec<(usize, E)>, tasks: usize) -> Result<(), PipelineError<E>> {
    let count = failures.len();
    match failures.into_iter().next() {
      None => Ok(()),
      Some((index, error)) => {
        warn!(
          pipeline = self.config().label(),
          tasks,
          failures = count,
          first_index = index,
          "concurrent callbacks failed"
        );
        Err(PipelineError::callback(index, error))
      }
    }
  }
}
