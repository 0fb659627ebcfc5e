//! Hello World jobs

use jobbox_host::{Job, JobMeta, Logger, ParamDefinition, Params};

use super::GROUPING;

const MODULE: &str = "hello_world";

fn meta(type_name: &str, name: &str, description: &str) -> JobMeta {
    JobMeta {
        class_path: format!("{}.{}", MODULE, type_name),
        name: name.to_string(),
        description: description.to_string(),
        grouping: GROUPING.to_string(),
    }
}

/// Writes a single debug line
pub struct HelloJobs;

impl Job for HelloJobs {
    fn meta(&self) -> JobMeta {
        meta(
            "HelloJobs",
            "Hello Jobs",
            "Hello World for first Nautobot Jobs",
        )
    }

    fn run(&self, logger: &Logger, _params: &Params) -> anyhow::Result<()> {
        logger.debug("Hello, this is my first Nautobot Job.");
        Ok(())
    }
}

/// Writes one line at every severity
pub struct HelloJobsWithLogs;

impl Job for HelloJobsWithLogs {
    fn meta(&self) -> JobMeta {
        meta(
            "HelloJobsWithLogs",
            "Hello Jobs with Logs",
            "Hello Jobs with different log types",
        )
    }

    fn run(&self, logger: &Logger, _params: &Params) -> anyhow::Result<()> {
        logger.info("This is an info type log.");
        logger.debug("This is a debug type log.");
        logger.warning("This is a warning type log.");
        logger.error("This is an error type log.");
        logger.critical("This is a critical type log.");
        Ok(())
    }
}

/// Greets the user named by the `username` input
pub struct HelloJobsWithInputs;

impl Job for HelloJobsWithInputs {
    fn meta(&self) -> JobMeta {
        meta(
            "HelloJobsWithInputs",
            "Hello Jobs with User Inputs",
            "Hello Jobs with Different User Inputs",
        )
    }

    fn params(&self) -> Vec<ParamDefinition> {
        vec![ParamDefinition::string("username")]
    }

    fn run(&self, logger: &Logger, params: &Params) -> anyhow::Result<()> {
        let username = params.string("username")?;
        logger.info(format!("Hello Jobs with {}.", username));
        Ok(())
    }
}
