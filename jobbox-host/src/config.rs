//! Host configuration
//!
//! Defines the tunables for running jobs: host identity, job timeout, and the
//! minimum level echoed to the terminal.

use anyhow::Context;
use jobbox_core::domain::log::LogLevel;
use std::time::Duration;
use tracing::warn;

/// Host configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Identifier for this host instance, recorded in host logs
    pub host_id: String,

    /// Maximum time a job can run before its run is marked timed out
    pub job_timeout: Duration,

    /// Minimum level of job log lines echoed to the terminal
    pub echo_level: LogLevel,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(host_id: String) -> Self {
        Self {
            host_id,
            job_timeout: Duration::from_secs(300), // 5 minutes
            echo_level: LogLevel::Debug,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JOBBOX_HOST_ID (optional, default: random UUID)
    /// - JOBBOX_JOB_TIMEOUT (optional, seconds, default: 300)
    /// - JOBBOX_ECHO_LEVEL (optional, default: debug)
    ///
    /// A variable that is set but invalid is an error; it never falls back
    /// to its default.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host_id) = lookup("JOBBOX_HOST_ID") {
            config.host_id = host_id;
        }

        if let Some(value) = lookup("JOBBOX_JOB_TIMEOUT") {
            let secs = value
                .trim()
                .parse::<u64>()
                .inspect_err(|_| warn!("Invalid JOBBOX_JOB_TIMEOUT value '{}'", value))
                .with_context(|| format!("JOBBOX_JOB_TIMEOUT must be whole seconds, got '{}'", value))?;
            config.job_timeout = Duration::from_secs(secs);
        }

        if let Some(value) = lookup("JOBBOX_ECHO_LEVEL") {
            config.echo_level = value
                .parse::<LogLevel>()
                .inspect_err(|_| warn!("Invalid JOBBOX_ECHO_LEVEL value '{}'", value))
                .with_context(|| format!("JOBBOX_ECHO_LEVEL must be a log level, got '{}'", value))?;
        }

        Ok(config)
    }

    pub fn with_job_timeout(mut self, job_timeout: Duration) -> Self {
        self.job_timeout = job_timeout;
        self
    }

    pub fn with_echo_level(mut self, echo_level: LogLevel) -> Self {
        self.echo_level = echo_level;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.host_id.is_empty() {
            anyhow::bail!("host_id cannot be empty");
        }

        if self.job_timeout.is_zero() {
            anyhow::bail!("job_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.job_timeout, Duration::from_secs(300));
        assert_eq!(config.echo_level, LogLevel::Debug);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.host_id = String::new();
        assert!(config.validate().is_err());

        config.host_id = "test".to_string();
        config.job_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        config.job_timeout = Duration::from_millis(500);
        assert!(config.validate().is_ok());
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| {
            vars.iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        }
    }

    #[test]
    fn test_from_lookup_reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("JOBBOX_HOST_ID", "host-7"),
            ("JOBBOX_JOB_TIMEOUT", "5"),
            ("JOBBOX_ECHO_LEVEL", "warning"),
        ]))
        .unwrap();

        assert_eq!(config.host_id, "host-7");
        assert_eq!(config.job_timeout, Duration::from_secs(5));
        assert_eq!(config.echo_level, LogLevel::Warning);
    }

    #[test]
    fn test_from_lookup_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(!config.host_id.is_empty());
        assert_eq!(config.job_timeout, Duration::from_secs(300));
        assert_eq!(config.echo_level, LogLevel::Debug);
    }

    #[test]
    fn test_from_lookup_rejects_invalid_values() {
        let err = Config::from_lookup(lookup(&[
            ("JOBBOX_JOB_TIMEOUT", "5"),
            ("JOBBOX_ECHO_LEVEL", "loud"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("JOBBOX_ECHO_LEVEL"));

        let err = Config::from_lookup(lookup(&[("JOBBOX_JOB_TIMEOUT", "abc")])).unwrap_err();
        assert!(err.to_string().contains("JOBBOX_JOB_TIMEOUT"));
    }

    /// Removes the variables it set when dropped
    struct EnvGuard(&'static [&'static str]);

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for name in self.0 {
                // SAFETY: only this test touches JOBBOX_* variables.
                unsafe { std::env::remove_var(name) };
            }
        }
    }

    #[test]
    fn test_from_env() {
        let _guard = EnvGuard(&["JOBBOX_HOST_ID", "JOBBOX_JOB_TIMEOUT", "JOBBOX_ECHO_LEVEL"]);
        // SAFETY: only this test touches JOBBOX_* variables.
        unsafe {
            std::env::set_var("JOBBOX_HOST_ID", "env-host");
            std::env::set_var("JOBBOX_JOB_TIMEOUT", "12");
            std::env::set_var("JOBBOX_ECHO_LEVEL", "error");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.host_id, "env-host");
        assert_eq!(config.job_timeout, Duration::from_secs(12));
        assert_eq!(config.echo_level, LogLevel::Error);

        // SAFETY: as above.
        unsafe { std::env::set_var("JOBBOX_JOB_TIMEOUT", "soon") };
        assert!(Config::from_env().is_err());
    }

    #[test]
    fn test_builders() {
        let config = Config::new("host-1".to_string())
            .with_job_timeout(Duration::from_secs(10))
            .with_echo_level(LogLevel::Warning);

        assert_eq!(config.host_id, "host-1");
        assert_eq!(config.job_timeout, Duration::from_secs(10));
        assert_eq!(config.echo_level, LogLevel::Warning);
    }
}
