//! # seqweave
//!
//! Lazy, composable transformations over in-memory sequences.
//!
//! A [`Pipeline`] wraps an ordered collection and records deferred steps
//! (sort, filter, distinct, skip/limit, peek, expand, ...). Nothing runs
//! until a terminal operation asks for a result; every terminal replays the
//! recorded steps over a fresh copy of the original elements.
//!
//! ## Key Features
//!
//! - **Immutable pipelines**: every builder returns a new pipeline; the
//!   original and any sibling branches are unaffected
//! - **Index-aware callbacks**: predicates, comparators and visitors see
//!   each element's current position
//! - **Concurrent terminals**: `for_each_async` and `for_each_chunk_async`
//!   run callbacks on a rayon worker group
//! - **Combinators**: [`wrap`]/[`map`] to change element type and [`join`]
//!   for a key-based full outer join of two pipelines
//!
//! ## Quick Start
//!
//! ```rust
//! use seqweave::{Pipeline, wrap};
//!
//! let numbers = Pipeline::new(vec![1, 9, 9, 9, 2, 3, 4, 5, 5, 6]);
//! let distinct = numbers
//!   .sort(|_, a, _, b| b < a)
//!   .distinct(|_, a, _, b| a == b);
//!
//! assert_eq!(distinct.skip(2).limit(3).get(), vec![5, 4, 3]);
//!
//! let labels = wrap(&distinct.limit(2), |i, v| [format!("{i}:{v}")]);
//! assert_eq!(labels.get(), vec!["0:9", "1:6"]);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`trace` per replayed step, `debug`
//! per evaluation, `warn` when concurrent callbacks fail) and never installs
//! a subscriber itself.

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

mod chain;
/// Cross-pipeline combinators: wrap/map and join.
pub mod combinators;
/// Per-pipeline configuration.
pub mod config;
/// Errors returned by iterating terminals.
pub mod error;
/// Concurrent terminal operations.
pub mod parallel;
/// The pipeline value and its chain-building operations.
pub mod pipeline;
/// Sequential terminal operations.
pub mod terminal;

pub use combinators::{join, map, wrap};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::Pipeline;

#[cfg(test)]
mod combinators_test;
