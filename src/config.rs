//! Per-pipeline configuration.
//!
//! A [`PipelineConfig`] travels with a pipeline through every builder and
//! combinator. The name shows up in log events; the parallelism setting
//! controls the worker group used by the concurrent terminals.

/// Configuration shared by a pipeline and everything derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
  /// Optional name for identifying this pipeline in logs.
  pub name: Option<String>,
  /// Number of worker threads for concurrent terminals.
  ///
  /// `None` runs them on the global rayon pool.
  pub parallelism: Option<usize>,
}

impl PipelineConfig {
  /// Sets the name for this configuration.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to the pipeline.
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Sets the number of worker threads used by concurrent terminals.
  pub fn with_parallelism(mut self, threads: usize) -> Self {
    self.parallelism = Some(threads);
    self
  }

  /// Returns the configured name, if any.
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  /// Returns the configured worker count, if any.
  pub fn parallelism(&self) -> Option<usize> {
    self.parallelism
  }

  pub(crate) fn label(&self) -> &str {
    self.name().unwrap_or("pipeline")
  }
}
