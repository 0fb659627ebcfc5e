//! Logger handle passed to jobs
//!
//! The host owns the sink; a job only borrows the `Logger` for the duration of
//! its `run` call. Every message is written to the sink and mirrored as a
//! `tracing` event so that host-side logs show job output too.

use jobbox_core::domain::log::LogLevel;
use std::sync::Mutex;

/// Trait for log sinks
///
/// Implement this trait to decide where job log lines end up:
/// - Execution service: buffered into the run record
/// - Tests: captured for assertions
///
/// # Thread Safety
/// Implementations must be Send + Sync because jobs run on blocking workers.
pub trait LogSink: Send + Sync {
    /// Write a log message
    ///
    /// # Arguments
    /// * `level` - The log level
    /// * `message` - The log message content
    fn write(&mut self, level: LogLevel, message: &str);
}

/// Logger handle supplied to a job at invocation time
pub struct Logger {
    job: String,
    sink: Mutex<Box<dyn LogSink>>,
}

impl Logger {
    /// Creates a logger for the named job writing to `sink`
    pub fn new<S: LogSink + 'static>(job: impl Into<String>, sink: S) -> Self {
        Self {
            job: job.into(),
            sink: Mutex::new(Box::new(sink)),
        }
    }

    /// Name of the job this logger was created for
    pub fn job(&self) -> &str {
        &self.job
    }

    /// Writes a message at the given level
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let message = message.as_ref();

        match level {
            LogLevel::Debug => tracing::debug!(job = %self.job, "{}", message),
            LogLevel::Info => tracing::info!(job = %self.job, "{}", message),
            LogLevel::Warning => tracing::warn!(job = %self.job, "{}", message),
            LogLevel::Error => tracing::error!(job = %self.job, "{}", message),
            LogLevel::Critical => {
                tracing::error!(job = %self.job, critical = true, "{}", message)
            }
        }

        // A job that panicked mid-write must not silence later runs sharing the sink.
        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sink.write(level, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Critical, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("job", &self.job).finish()
    }
}
