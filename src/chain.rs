//! # Deferred Step Chain
//!
//! Persistent, append-only list of deferred steps and the routine that
//! replays them over a fresh copy of a pipeline's source values.
//!
//! Appending a step allocates a single node that points at the previous
//! tail, so every pipeline derived from a common ancestor shares the
//! ancestor's prefix and owns an independent suffix. Nothing in a chain is
//! ever mutated after construction.

use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Boxed step body: consumes the current buffer and returns its replacement.
pub(crate) type StepFn<V> = Arc<dyn Fn(Vec<V>) -> Vec<V> + Send + Sync>;

/// A named, deferred transformation of the whole buffer.
pub(crate) struct Step<V> {
  name: &'static str,
  apply: StepFn<V>,
}

impl<V> Step<V> {
  pub(crate) fn new<F>(name: &'static str, apply: F) -> Self
  where
    F: Fn(Vec<V>) -> Vec<V> + Send + Sync + 'static,
  {
    Self {
      name,
      apply: Arc::new(apply),
    }
  }

  pub(crate) fn name(&self) -> &'static str {
    self.name
  }
}

struct Node<V> {
  step: Step<V>,
  prev: Option<Arc<Node<V>>>,
}

/// Immutable list of steps, newest last.
pub(crate) struct Chain<V> {
  tail: Option<Arc<Node<V>>>,
  len: usize,
}

impl<V> Clone for Chain<V> {
  fn clone(&self) -> Self {
    Self {
      tail: self.tail.clone(),
      len: self.len,
    }
  }
}

impl<V> Default for Chain<V> {
  fn default() -> Self {
    Self { tail: None, len: 0 }
  }
}

impl<V> Chain<V> {
  /// Returns a new chain ending in `step`; `self` is left untouched.
  pub(crate) fn append(&self, step: Step<V>) -> Self {
    Self {
      tail: Some(Arc::new(Node {
        step,
        prev: self.tail.clone(),
      })),
      len: self.len + 1,
    }
  }

  pub(crate) fn len(&self) -> usize {
    self.len
  }

  /// Steps in the order they were appended.
  pub(crate) fn steps(&self) -> Vec<&Step<V>> {
    let mut steps = Vec::with_capacity(self.len);
    let mut cursor = self.tail.as_deref();
    while let Some(node) = cursor {
      steps.push(&node.step);
      cursor = node.prev.as_deref();
    }
    steps.reverse();
    steps
  }

  /// Runs every step, oldest first, over `buffer`.
  pub(crate) fn replay(&self, buffer: Vec<V>) -> Vec<V> {
    self.steps().into_iter().fold(buffer, |buffer, step| {
      let before = buffer.len();
      let buffer = (step.apply)(buffer);
      trace!(step = step.name, before, after = buffer.len(), "replayed step");
      buffer
    })
  }
}

impl<V> fmt::Debug for Chain<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list()
      .entries(self.steps().into_iter().map(Step::name))
      .finish()
  }
}
