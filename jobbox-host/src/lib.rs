//! Jobbox Host
//!
//! The host side of the job contract: everything a job needs in order to be
//! discovered, validated, executed and observed.
//!
//! It includes:
//! - `Job` trait and the registry jobs are submitted to
//! - Logger handle and log sinks
//! - Parameter validation against job declarations
//! - Execution service that runs a job and records the outcome
//! - Host configuration

pub mod buffer;
pub mod config;
pub mod error;
pub mod execution;
pub mod job;
pub mod logger;
pub mod params;
pub mod registry;

pub use buffer::InMemoryLogBuffer;
pub use config::Config;
pub use error::{ExecutionError, ParamError, RegistryError};
pub use execution::{ExecutionService, StandardExecutionService};
pub use job::Job;
pub use logger::{LogSink, Logger};
pub use params::Params;
pub use registry::JobRegistry;

pub use jobbox_core::domain::job::{JobMeta, JobRun, JobStatus};
pub use jobbox_core::domain::log::{LogEntry, LogLevel};
pub use jobbox_core::domain::param::{ParamDefinition, ParamKind};
