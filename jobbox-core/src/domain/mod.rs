//! Core domain types
//!
//! These types describe what a job declares (metadata, parameters) and what
//! the host records when it runs one (runs, log entries). They carry no
//! execution logic; that lives in `jobbox-host`.

pub mod job;
pub mod log;
pub mod param;
