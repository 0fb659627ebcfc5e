//! Job registry
//!
//! Central place jobs are submitted to at load time. Keeps registration order
//! for listing and resolves jobs by display name or class path.

use jobbox_core::domain::job::JobMeta;
use jobbox_core::dto::job::JobSummary;
use std::sync::Arc;
use tracing::debug;

use crate::error::RegistryError;
use crate::job::Job;

/// Registry of runnable jobs
#[derive(Default)]
pub struct JobRegistry {
    jobs: Vec<Arc<dyn Job>>,
}

impl JobRegistry {
    /// Creates a new empty job registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a job
    ///
    /// # Errors
    /// Returns `RegistryError::Duplicate` if a job with the same class path or
    /// display name is already registered.
    pub fn register<J: Job + 'static>(&mut self, job: J) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(job))
    }

    /// Registers an already shared job
    pub fn register_arc(&mut self, job: Arc<dyn Job>) -> Result<(), RegistryError> {
        self.register_jobs([job])
    }

    /// Registers an ordered list of jobs
    ///
    /// Every job is checked before any is added: on a duplicate, either
    /// against the registry or within `jobs`, the registry is left unchanged.
    pub fn register_jobs<I>(&mut self, jobs: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn Job>>,
    {
        let mut seen: Vec<JobMeta> = self.jobs.iter().map(|j| j.meta()).collect();
        let mut pending = Vec::new();

        for job in jobs {
            let meta = job.meta();
            let taken = seen.iter().find(|existing| {
                existing.class_path == meta.class_path || existing.name == meta.name
            });
            if let Some(existing) = taken {
                return Err(RegistryError::Duplicate(existing.class_path.clone()));
            }
            seen.push(meta);
            pending.push(job);
        }

        for job in pending {
            let meta = job.meta();
            debug!("Registered job '{}' ({})", meta.name, meta.class_path);
            self.jobs.push(job);
        }
        Ok(())
    }

    /// Gets a job by display name or class path
    pub fn get(&self, key: &str) -> Option<Arc<dyn Job>> {
        self.jobs
            .iter()
            .find(|job| {
                let meta = job.meta();
                meta.name == key || meta.class_path == key
            })
            .cloned()
    }

    /// Returns all registered jobs in registration order
    pub fn jobs(&self) -> &[Arc<dyn Job>] {
        &self.jobs
    }

    /// Listing views of all registered jobs
    pub fn summaries(&self) -> Vec<JobSummary> {
        self.jobs.iter().map(|job| job.summary()).collect()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::params::Params;

    struct TestJob {
        class_path: &'static str,
        name: &'static str,
    }

    impl Job for TestJob {
        fn meta(&self) -> JobMeta {
            JobMeta {
                class_path: self.class_path.to_string(),
                name: self.name.to_string(),
                description: "test".to_string(),
                grouping: "Tests".to_string(),
            }
        }

        fn run(&self, _logger: &Logger, _params: &Params) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn job(class_path: &'static str, name: &'static str) -> Arc<dyn Job> {
        Arc::new(TestJob { class_path, name })
    }

    #[test]
    fn test_job_registration() {
        let mut registry = JobRegistry::new();
        registry
            .register(TestJob {
                class_path: "tests.One",
                name: "One",
            })
            .unwrap();

        assert!(registry.get("One").is_some());
        assert!(registry.get("tests.One").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = JobRegistry::new();
        registry.register_arc(job("tests.One", "One")).unwrap();

        let err = registry.register_arc(job("tests.One", "Other")).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("tests.One".to_string()));

        let err = registry.register_arc(job("tests.Two", "One")).unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("tests.One".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_jobs_keeps_order() {
        let mut registry = JobRegistry::new();
        registry
            .register_jobs(vec![
                job("tests.C", "C"),
                job("tests.A", "A"),
                job("tests.B", "B"),
            ])
            .unwrap();

        let names: Vec<String> = registry.summaries().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_register_jobs_is_all_or_nothing() {
        let mut registry = JobRegistry::new();
        registry.register_arc(job("tests.Existing", "Existing")).unwrap();

        let result = registry.register_jobs(vec![
            job("tests.A", "A"),
            job("tests.A", "A"),
            job("tests.B", "B"),
        ]);
        assert_eq!(result, Err(RegistryError::Duplicate("tests.A".to_string())));

        let result = registry.register_jobs(vec![
            job("tests.C", "C"),
            job("tests.D", "Existing"),
        ]);
        assert_eq!(
            result,
            Err(RegistryError::Duplicate("tests.Existing".to_string()))
        );

        assert_eq!(registry.len(), 1);
        assert!(registry.get("A").is_none());
        assert!(registry.get("C").is_none());
    }
}
