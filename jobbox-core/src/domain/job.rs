//! Job domain types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::log::LogEntry;

/// Descriptive metadata a job declares about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMeta {
    /// Stable identifier, `<module>.<JobType>`
    pub class_path: String,
    /// Display name
    pub name: String,
    pub description: String,
    /// Display name of the job set this job was registered from
    pub grouping: String,
}

/// Job run record
///
/// Created by the host for each invocation and filled in as the run proceeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRun {
    pub id: Uuid,
    pub class_path: String,
    pub job_name: String,
    pub status: JobStatus,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Validated parameters, ordered by name
    pub parameters: BTreeMap<String, serde_json::Value>,
    pub logs: Vec<LogEntry>,
    pub result: Option<JobResult>,
}

impl JobRun {
    /// Creates a pending run for the given job
    pub fn pending(meta: &JobMeta, parameters: BTreeMap<String, serde_json::Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            class_path: meta.class_path.clone(),
            job_name: meta.name.clone(),
            status: JobStatus::Pending,
            requested_at: chrono::Utc::now(),
            started_at: None,
            completed_at: None,
            parameters,
            logs: Vec::new(),
            result: None,
        }
    }

    /// Marks the run as started
    pub fn start(&mut self) {
        self.status = JobStatus::Running;
        self.started_at = Some(chrono::Utc::now());
    }

    /// Marks the run as finished with the given terminal status
    pub fn finish(&mut self, status: JobStatus, error_message: Option<String>) {
        self.status = status;
        self.completed_at = Some(chrono::Utc::now());
        self.result = Some(JobResult {
            success: status == JobStatus::Succeeded,
            error_message,
        });
    }

    /// Run duration, if the run has both started and completed
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.completed_at) {
            (Some(started), Some(completed)) => Some(completed.signed_duration_since(started)),
            _ => None,
        }
    }
}

/// Job run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    TimedOut,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Failed | JobStatus::TimedOut
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "Pending"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Succeeded => write!(f, "Succeeded"),
            JobStatus::Failed => write!(f, "Failed"),
            JobStatus::TimedOut => write!(f, "TimedOut"),
        }
    }
}

/// Result of a job run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    pub success: bool,
    pub error_message: Option<String>,
}
