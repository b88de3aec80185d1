//! # Cross-Pipeline Combinators
//!
//! Free functions that evaluate one or two pipelines and build a new root
//! pipeline (with no recorded steps) from the results.
//!
//! ## Example
//!
//! ```rust
//! use seqweave::{Pipeline, join};
//!
//! let cities = Pipeline::new(vec![("Gomel", "by"), ("London", "gb")]);
//! let countries = Pipeline::new(vec![("by", "Belarus"), ("cn", "China")]);
//!
//! let rows = join(
//!   &cities,
//!   |_, city| city.1,
//!   &countries,
//!   |_, country| country.0,
//!   |city, country| {
//!     let city = city.map_or("unknown city", |c| c.0);
//!     let country = country.map_or("unknown country", |c| c.1);
//!     [(city, country)]
//!   },
//! );
//!
//! assert_eq!(
//!   rows.get(),
//!   vec![
//!     ("Gomel", "Belarus"),
//!     ("London", "unknown country"),
//!     ("unknown city", "China"),
//!   ]
//! );
//! ```

use crate::pipeline::Pipeline;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;

/// Evaluates `source` once and maps every element to zero or more new ones.
///
/// The result is a new pipeline over the concatenated outputs, in source
/// order, carrying the source's configuration.
pub fn wrap<V, NV, F, I>(source: &Pipeline<V>, mut f: F) -> Pipeline<NV>
where
  V: Clone,
  F: FnMut(usize, &V) -> I,
  I: IntoIterator<Item = NV>,
{
  let values: Vec<NV> = source
    .evaluate()
    .iter()
    .enumerate()
    .flat_map(|(i, v)| f(i, v))
    .collect();
  Pipeline::with_parts(values, source.config().clone())
}

/// Alias of [`wrap`].
pub fn map<V, NV, F, I>(source: &Pipeline<V>, f: F) -> Pipeline<NV>
where
  V: Clone,
  F: FnMut(usize, &V) -> I,
  I: IntoIterator<Item = NV>,
{
  wrap(source, f)
}

/// Full outer equi-join of two pipelines.
///
/// `merge(left, right)` is called once per left element, with the right
/// element sharing its key if there is one, and once per right key that no
/// left element matched, with `left` set to `None`. Each call may produce
/// any number of rows.
///
/// Matching rules:
///
/// - When several right elements share a key, the last one is used.
/// - A right key counts as matched as soon as one left element matches it.
///   Later left elements with the same key still receive the right element,
///   but the key never shows up again among the unmatched rows.
/// - Rows for left elements come first, in left order. Rows for unmatched
///   right keys follow, in the order the keys first appear on the right.
///
/// The result carries the left pipeline's configuration.
pub fn join<V, W, VW, K, FV, FW, M, I>(
  left: &Pipeline<V>,
  mut left_key: FV,
  right: &Pipeline<W>,
  mut right_key: FW,
  mut merge: M,
) -> Pipeline<VW>
where
  V: Clone,
  W: Clone,
  K: Hash + Eq + Clone,
  FV: FnMut(usize, &V) -> K,
  FW: FnMut(usize, &W) -> K,
  M: FnMut(Option<&V>, Option<&W>) -> I,
  I: IntoIterator<Item = VW>,
{
  let mut right_by_key: HashMap<K, W> = HashMap::new();
  let mut right_order: Vec<K> = Vec::new();
  for (i, w) in right.evaluate().into_iter().enumerate() {
    let key = right_key(i, &w);
    if right_by_key.insert(key.clone(), w).is_none() {
      right_order.push(key);
    }
  }
  let mut unmatched: HashSet<K> = right_order.iter().cloned().collect();

  let mut rows: Vec<VW> = Vec::new();
  for (i, v) in left.evaluate().iter().enumerate() {
    let key = left_key(i, v);
    let found = right_by_key.get(&key);
    rows.extend(merge(Some(v), found));
    if found.is_some() {
      unmatched.remove(&key);
    }
  }
  let matched_rows = rows.len();

  for key in right_order.iter().filter(|key| unmatched.contains(*key)) {
    rows.extend(merge(None, right_by_key.get(key)));
  }

  debug!(
    pipeline = left.config().label(),
    right_keys = right_order.len(),
    unmatched_right = unmatched.len(),
    rows = rows.len(),
    matched_rows,
    "joined pipelines"
  );
  Pipeline::with_parts(rows, left.config().clone())
}
