//! Job DTOs for listing and reporting

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::{JobMeta, JobRun, JobStatus};
use crate::domain::param::ParamDefinition;

/// Summary of a registered job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub class_path: String,
    pub name: String,
    pub description: String,
    pub grouping: String,
    pub params: Vec<ParamDefinition>,
}

impl JobSummary {
    pub fn new(meta: JobMeta, params: Vec<ParamDefinition>) -> Self {
        Self {
            class_path: meta.class_path,
            name: meta.name,
            description: meta.description,
            grouping: meta.grouping,
            params,
        }
    }
}

/// Run summary without the log entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: Uuid,
    pub job_name: String,
    pub status: JobStatus,
    pub log_count: usize,
    pub error_message: Option<String>,
}

impl From<&JobRun> for RunSummary {
    fn from(run: &JobRun) -> Self {
        Self {
            id: run.id,
            job_name: run.job_name.clone(),
            status: run.status,
            log_count: run.logs.len(),
            error_message: run
                .result
                .as_ref()
                .and_then(|result| result.error_message.clone()),
        }
    }
}
