//! Data Transfer Objects
//!
//! Lightweight, serializable views of domain entities used for listing
//! registered jobs and reporting runs.

pub mod job;
