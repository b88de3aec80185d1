//! # Pipeline
//!
//! The immutable [`Pipeline`] value and its chain-building operations.
//!
//! A pipeline holds the original elements plus an ordered list of deferred
//! steps. Every chain-building call returns a *new* pipeline that shares the
//! original elements and the existing steps and records one more step;
//! nothing runs until a terminal operation (see [`crate::terminal`]) asks
//! for a result.
//!
//! ## Callback indices
//!
//! Index arguments handed to callbacks are positions in the buffer as it
//! enters the step that calls them, not positions in the original input.
//! After a `filter` or `sort` the same element will generally see a
//! different index in later steps.
//!
//! ## Example
//!
//! ```rust
//! use seqweave::Pipeline;
//!
//! let numbers = Pipeline::new(vec![5, 6, 7, 8, 1, 2, 4, 9, 3]);
//! let sorted = numbers.sort(|_, a, _, b| a < b);
//! let threes = sorted.filter(|_, v| v % 3 == 0);
//!
//! assert_eq!(threes.get(), vec![3, 6, 9]);
//! // Deriving `threes` did not touch `sorted`.
//! assert_eq!(sorted.count(), 9);
//! ```

use crate::chain::{Chain, Step};
use crate::config::PipelineConfig;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// An immutable, lazily evaluated sequence of `V`.
///
/// Cloning a pipeline is cheap: the original elements and the recorded
/// steps are reference counted and shared.
pub struct Pipeline<V> {
  values: Arc<[V]>,
  chain: Chain<V>,
  config: PipelineConfig,
}

impl<V> Clone for Pipeline<V> {
  fn clone(&self) -> Self {
    Self {
      values: Arc::clone(&self.values),
      chain: self.chain.clone(),
      config: self.config.clone(),
    }
  }
}

impl<V> fmt::Debug for Pipeline<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("name", &self.config.name())
      .field("source_len", &self.values.len())
      .field("steps", &self.chain)
      .finish()
  }
}

impl<V> Pipeline<V> {
  /// Creates a pipeline over `values` with no recorded steps.
  pub fn new(values: impl Into<Vec<V>>) -> Self {
    let values: Vec<V> = values.into();
    Self {
      values: Arc::from(values),
      chain: Chain::default(),
      config: PipelineConfig::default(),
    }
  }

  pub(crate) fn with_parts(values: Vec<V>, config: PipelineConfig) -> Self {
    Self {
      values: Arc::from(values),
      chain: Chain::default(),
      config,
    }
  }

  /// Returns a pipeline with the same elements and steps and a new config.
  pub fn with_config(&self, config: PipelineConfig) -> Self {
    Self {
      values: Arc::clone(&self.values),
      chain: self.chain.clone(),
      config,
    }
  }

  /// Returns a pipeline renamed to `name`.
  pub fn with_name(&self, name: impl Into<String>) -> Self {
    self.with_config(self.config.clone().with_name(name))
  }

  /// Returns a pipeline whose concurrent terminals use `threads` workers.
  pub fn with_parallelism(&self, threads: usize) -> Self {
    self.with_config(self.config.clone().with_parallelism(threads))
  }

  /// The pipeline's configuration.
  pub fn config(&self) -> &PipelineConfig {
    &self.config
  }

  /// The pipeline's name, if one was set.
  pub fn name(&self) -> Option<&str> {
    self.config.name()
  }

  /// Number of deferred steps recorded so far.
  pub fn steps(&self) -> usize {
    self.chain.len()
  }

  /// Length of the original input, before any step runs.
  pub fn source_len(&self) -> usize {
    self.values.len()
  }

  fn then(&self, step: Step<V>) -> Self {
    Self {
      values: Arc::clone(&self.values),
      chain: self.chain.append(step),
      config: self.config.clone(),
    }
  }
}

impl<V: Clone> Pipeline<V> {
  /// Replays every step over a private copy of the original elements.
  pub(crate) fn evaluate(&self) -> Vec<V> {
    let values = self.chain.replay(self.values.to_vec());
    debug!(
      pipeline = self.config.label(),
      steps = self.chain.len(),
      len = values.len(),
      "evaluated pipeline"
    );
    values
  }
}

impl<V: 'static> Pipeline<V> {
  /// Reorders the elements using a less-than comparator.
  ///
  /// `less(i, a, j, b)` must return `true` when `a` belongs before `b`;
  /// `i` and `j` are the elements' positions as the step starts. Ties keep
  /// their relative order, but callers should not rely on that.
  pub fn sort<F>(&self, less: F) -> Self
  where
    F: Fn(usize, &V, usize, &V) -> bool + Send + Sync + 'static,
  {
    self.then(Step::new("sort", move |values: Vec<V>| {
      let mut indexed: Vec<(usize, V)> = values.into_iter().enumerate().collect();
      indexed.sort_by(|(i, a), (j, b)| {
        if less(*i, a, *j, b) {
          Ordering::Less
        } else if less(*j, b, *i, a) {
          Ordering::Greater
        } else {
          Ordering::Equal
        }
      });
      indexed.into_iter().map(|(_, v)| v).collect()
    }))
  }

  /// Keeps the elements for which `pred(index, value)` holds.
  pub fn filter<F>(&self, pred: F) -> Self
  where
    F: Fn(usize, &V) -> bool + Send + Sync + 'static,
  {
    self.then(Step::new("filter", move |values: Vec<V>| {
      values
        .into_iter()
        .enumerate()
        .filter(|(i, v)| pred(*i, v))
        .map(|(_, v)| v)
        .collect()
    }))
  }

  /// Calls `visit(index, value)` for every element without changing them.
  ///
  /// `visit` runs once per evaluation, so a pipeline evaluated twice
  /// visits every element twice.
  pub fn peek<F>(&self, visit: F) -> Self
  where
    F: Fn(usize, &V) + Send + Sync + 'static,
  {
    self.then(Step::new("peek", move |values: Vec<V>| {
      for (i, v) in values.iter().enumerate() {
        visit(i, v);
      }
      values
    }))
  }

  /// Replaces every element with the elements returned by `expand`.
  pub fn expand<F, I>(&self, expand: F) -> Self
  where
    F: Fn(usize, &V) -> I + Send + Sync + 'static,
    I: IntoIterator<Item = V>,
  {
    self.then(Step::new("expand", move |values: Vec<V>| {
      values
        .into_iter()
        .enumerate()
        .flat_map(|(i, v)| expand(i, &v))
        .collect()
    }))
  }

  /// Keeps at most the first `n` elements.
  pub fn limit(&self, n: usize) -> Self {
    self.then(Step::new("limit", move |mut values: Vec<V>| {
      values.truncate(n);
      values
    }))
  }

  /// Drops the first `n` elements.
  pub fn skip(&self, n: usize) -> Self {
    self.then(Step::new("skip", move |mut values: Vec<V>| {
      let n = n.min(values.len());
      values.drain(..n);
      values
    }))
  }

  /// Reverses the order of the elements.
  pub fn reverse(&self) -> Self {
    self.then(Step::new("reverse", |mut values: Vec<V>| {
      values.reverse();
      values
    }))
  }

  /// Removes duplicates using an index-aware equality.
  ///
  /// Incoming elements are compared, front to back, against the elements
  /// kept so far with `eq(incoming_index, incoming, kept_index, kept)`.
  /// On the first match the kept element is **replaced** by the incoming
  /// one, which keeps the earlier position but the later value. Elements
  /// that match nothing are appended.
  ///
  /// This is quadratic in the number of elements.
  ///
  /// ```rust
  /// use seqweave::Pipeline;
  ///
  /// let tagged = Pipeline::new(vec![(1, 'a'), (9, 'b'), (9, 'c'), (2, 'd')]);
  /// let distinct = tagged.distinct(|_, a, _, b| a.0 == b.0);
  /// assert_eq!(distinct.get(), vec![(1, 'a'), (9, 'c'), (2, 'd')]);
  /// ```
  pub fn distinct<F>(&self, eq: F) -> Self
  where
    F: Fn(usize, &V, usize, &V) -> bool + Send + Sync + 'static,
  {
    self.then(Step::new("distinct", move |values: Vec<V>| {
      let mut unique: Vec<V> = Vec::new();
      for (j, v) in values.into_iter().enumerate() {
        match unique.iter().enumerate().position(|(i, u)| eq(j, &v, i, u)) {
          Some(i) => unique[i] = v,
          None => unique.push(v),
        }
      }
      unique
    }))
  }

  /// Removes duplicates by an extracted key; the first element per key wins.
  pub fn distinct_by_key<F, K>(&self, key: F) -> Self
  where
    F: Fn(usize, &V) -> K + Send + Sync + 'static,
    K: Hash + Eq,
  {
    self.then(Step::new("distinct_by_key", move |values: Vec<V>| {
      let mut seen = HashSet::new();
      values
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| seen.insert(key(i, &v)).then_some(v))
        .collect()
    }))
  }
}

impl<V> From<Vec<V>> for Pipeline<V> {
  fn from(values: Vec<V>) -> Self {
    Self::new(values)
  }
}

impl<V> FromIterator<V> for Pipeline<V> {
  fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect::<Vec<_>>())
  }
}
