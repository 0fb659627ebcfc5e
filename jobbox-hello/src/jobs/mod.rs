//! Job definition set
//!
//! Every job defined here is submitted to the registry in a fixed order by
//! `register_jobs`.

mod hello_world;

pub use hello_world::{HelloJobs, HelloJobsWithInputs, HelloJobsWithLogs};

use jobbox_host::{Job, JobRegistry, RegistryError};
use std::sync::Arc;

/// Display name shared by the jobs in this set
pub const GROUPING: &str = "Hello World Nautobot Jobs";

/// Jobs in this set, in registration order
pub fn definitions() -> Vec<Arc<dyn Job>> {
    let jobs: [Arc<dyn Job>; 3] = [
        Arc::new(HelloJobs),
        Arc::new(HelloJobsWithLogs),
        Arc::new(HelloJobsWithInputs),
    ];
    jobs.into()
}

/// Submits this job set to `registry`
pub fn register_jobs(registry: &mut JobRegistry) -> Result<(), RegistryError> {
    registry.register_jobs(definitions())
}
