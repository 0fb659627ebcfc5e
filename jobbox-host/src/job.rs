use jobbox_core::domain::job::JobMeta;
use jobbox_core::domain::param::ParamDefinition;
use jobbox_core::dto::job::JobSummary;

use crate::logger::Logger;
use crate::params::Params;

/// Trait for jobs the host can run.
///
/// A job describes itself through `meta()` and `params()`, and does its work
/// in `run()`. Instances are created once when they are registered and shared
/// across runs, so `run` must not rely on state left behind by a previous run.
///
/// # Example
///
/// ```rust
/// use jobbox_host::{Job, JobMeta, Logger, Params};
///
/// struct Ping;
///
/// impl Job for Ping {
///     fn meta(&self) -> JobMeta {
///         JobMeta {
///             class_path: "ping.Ping".to_string(),
///             name: "Ping".to_string(),
///             description: "Says pong".to_string(),
///             grouping: "Examples".to_string(),
///         }
///     }
///
///     fn run(&self, logger: &Logger, _params: &Params) -> anyhow::Result<()> {
///         logger.info("pong");
///         Ok(())
///     }
/// }
/// ```
pub trait Job: Send + Sync {
    /// Returns the job's identity and display metadata.
    fn meta(&self) -> JobMeta;

    /// Returns the inputs this job requires.
    ///
    /// The host validates supplied values against these declarations before
    /// calling `run`; a job with no declarations accepts no parameters.
    fn params(&self) -> Vec<ParamDefinition> {
        Vec::new()
    }

    /// Runs the job.
    ///
    /// # Arguments
    /// * `logger` - Host-owned logger, borrowed for the duration of the call
    /// * `params` - Parameters already validated against `params()`
    ///
    /// # Errors
    /// Any error is reported by the host and marks the run as failed.
    fn run(&self, logger: &Logger, params: &Params) -> anyhow::Result<()>;

    /// Listing view of this job
    fn summary(&self) -> JobSummary {
        JobSummary::new(self.meta(), self.params())
    }
}
