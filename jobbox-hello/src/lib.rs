//! Hello World jobs
//!
//! A small job definition set showing how to declare a job, declare an input
//! and write to the host-supplied logger, plus the `jobbox` CLI that drives
//! them through the host.

pub mod jobs;

pub use jobs::register_jobs;
