//! Execution service
//!
//! Handles a single job run:
//! - Validating supplied parameters against the job's declarations
//! - Running the job on a blocking worker with a buffered logger
//! - Turning errors, panics and timeouts into a failed run record
//!
//! Validation failures are returned as errors and the job is never invoked.
//! Anything that goes wrong inside the job is recorded on the run instead.

use async_trait::async_trait;
use jobbox_core::domain::job::{JobRun, JobStatus};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::buffer::InMemoryLogBuffer;
use crate::config::Config;
use crate::error::ExecutionError;
use crate::job::Job;
use crate::logger::Logger;
use crate::params;

/// Service trait for executing jobs
#[async_trait]
pub trait ExecutionService: Send + Sync {
    /// Executes a job
    ///
    /// # Arguments
    /// * `job` - The job to run
    /// * `parameters` - Raw parameter values, validated before the job runs
    ///
    /// # Returns
    /// The completed run record, whatever the job's outcome
    ///
    /// # Errors
    /// `ExecutionError::InvalidParameters` if validation rejects the parameters
    async fn execute(
        &self,
        job: Arc<dyn Job>,
        parameters: HashMap<String, JsonValue>,
    ) -> Result<JobRun, ExecutionError>;
}

/// Standard implementation of ExecutionService
pub struct StandardExecutionService {
    job_timeout: Duration,
}

impl StandardExecutionService {
    pub fn new(job_timeout: Duration) -> Self {
        Self { job_timeout }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.job_timeout)
    }
}

impl Default for StandardExecutionService {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[async_trait]
impl ExecutionService for StandardExecutionService {
    async fn execute(
        &self,
        job: Arc<dyn Job>,
        parameters: HashMap<String, JsonValue>,
    ) -> Result<JobRun, ExecutionError> {
        let meta = job.meta();

        let params = params::validate(&job.params(), &parameters).map_err(|errors| {
            warn!(
                "Rejected run of job '{}': {} invalid parameter(s)",
                meta.name,
                errors.len()
            );
            ExecutionError::InvalidParameters {
                job: meta.name.clone(),
                errors,
            }
        })?;

        let parameters = params
            .values()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        let mut run = JobRun::pending(&meta, parameters);
        run.start();
        info!("Starting run {} of job '{}'", run.id, meta.name);

        let buffer = InMemoryLogBuffer::new();
        let logger = Logger::new(meta.name.clone(), buffer.clone());

        let task = tokio::task::spawn_blocking(move || job.run(&logger, &params));

        let (status, error_message) = match tokio::time::timeout(self.job_timeout, task).await {
            Ok(Ok(Ok(()))) => (JobStatus::Succeeded, None),
            Ok(Ok(Err(e))) => (JobStatus::Failed, Some(format!("{:#}", e))),
            Ok(Err(join_error)) => (JobStatus::Failed, Some(describe_join_error(join_error))),
            Err(_) => (
                JobStatus::TimedOut,
                Some(format!(
                    "Job exceeded timeout of {}s",
                    self.job_timeout.as_secs_f64()
                )),
            ),
        };

        // Entries written after a timeout are dropped along with the buffer.
        run.logs = buffer.drain();
        run.finish(status, error_message);

        match run.status {
            JobStatus::Succeeded => info!("Run {} of job '{}' succeeded", run.id, meta.name),
            _ => error!(
                "Run {} of job '{}' ended as {}: {}",
                run.id,
                meta.name,
                run.status,
                run.result
                    .as_ref()
                    .and_then(|r| r.error_message.as_deref())
                    .unwrap_or("unknown error")
            ),
        }

        Ok(run)
    }
}

fn describe_join_error(join_error: JoinError) -> String {
    if !join_error.is_panic() {
        return format!("Job task was cancelled: {}", join_error);
    }

    let payload = join_error.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("Job panicked: {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use jobbox_core::domain::job::JobMeta;
    use jobbox_core::domain::log::LogLevel;
    use jobbox_core::domain::param::ParamDefinition;
    use std::sync::atomic::{AtomicBool, Ordering};

    enum Behavior {
        Greet,
        Fail,
        Panic,
        Sleep(Duration),
    }

    struct StubJob {
        behavior: Behavior,
        ran: Arc<AtomicBool>,
    }

    impl StubJob {
        fn new(behavior: Behavior) -> (Arc<dyn Job>, Arc<AtomicBool>) {
            let ran = Arc::new(AtomicBool::new(false));
            let job: Arc<dyn Job> = Arc::new(Self {
                behavior,
                ran: ran.clone(),
            });
            (job, ran)
        }
    }

    impl Job for StubJob {
        fn meta(&self) -> JobMeta {
            JobMeta {
                class_path: "tests.StubJob".to_string(),
                name: "Stub Job".to_string(),
                description: "Job used by execution tests".to_string(),
                grouping: "Tests".to_string(),
            }
        }

        fn params(&self) -> Vec<ParamDefinition> {
            vec![ParamDefinition::string("who")]
        }

        fn run(&self, logger: &Logger, params: &Params) -> anyhow::Result<()> {
            self.ran.store(true, Ordering::SeqCst);
            let who = params.string("who")?;
            logger.info(format!("hello {}", who));

            match self.behavior {
                Behavior::Greet => Ok(()),
                Behavior::Fail => anyhow::bail!("could not reach {}", who),
                Behavior::Panic => panic!("stub exploded"),
                Behavior::Sleep(duration) => {
                    std::thread::sleep(duration);
                    Ok(())
                }
            }
        }
    }

    fn who(name: &str) -> HashMap<String, JsonValue> {
        HashMap::from([("who".to_string(), JsonValue::String(name.to_string()))])
    }

    #[tokio::test]
    async fn test_successful_run() {
        let (job, ran) = StubJob::new(Behavior::Greet);
        let service = StandardExecutionService::default();

        let run = service.execute(job, who("alice")).await.unwrap();

        assert!(ran.load(Ordering::SeqCst));
        assert_eq!(run.status, JobStatus::Succeeded);
        assert_eq!(run.job_name, "Stub Job");
        assert_eq!(run.logs.len(), 1);
        assert_eq!(run.logs[0].level, LogLevel::Info);
        assert_eq!(run.logs[0].message, "hello alice");
        assert!(run.result.unwrap().success);
        assert!(run.started_at.is_some() && run.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_missing_parameter_rejected_before_run() {
        let (job, ran) = StubJob::new(Behavior::Greet);
        let service = StandardExecutionService::default();

        let err = service.execute(job, HashMap::new()).await.unwrap_err();

        assert!(!ran.load(Ordering::SeqCst));
        match err {
            ExecutionError::InvalidParameters { job, errors } => {
                assert_eq!(job, "Stub Job");
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].name(), "who");
            }
        }
    }

    #[tokio::test]
    async fn test_job_error_marks_run_failed() {
        let (job, _ran) = StubJob::new(Behavior::Fail);
        let service = StandardExecutionService::default();

        let run = service.execute(job, who("bob")).await.unwrap();

        assert_eq!(run.status, JobStatus::Failed);
        assert_eq!(run.logs.len(), 1);
        let result = run.result.unwrap();
        assert!(!result.success);
        assert_eq!(result.error_message.as_deref(), Some("could not reach bob"));
    }

    #[tokio::test]
    async fn test_job_panic_marks_run_failed() {
        let (job, _ran) = StubJob::new(Behavior::Panic);
        let service = StandardExecutionService::default();

        let run = service.execute(job, who("carol")).await.unwrap();

        assert_eq!(run.status, JobStatus::Failed);
        let message = run.result.unwrap().error_message.unwrap();
        assert!(message.contains("stub exploded"));
    }

    #[tokio::test]
    async fn test_slow_job_times_out() {
        let (job, _ran) = StubJob::new(Behavior::Sleep(Duration::from_millis(500)));
        let service = StandardExecutionService::new(Duration::from_millis(20));

        let run = service.execute(job, who("dave")).await.unwrap();

        assert_eq!(run.status, JobStatus::TimedOut);
        assert!(run.result.unwrap().error_message.unwrap().contains("timeout"));
    }
}
