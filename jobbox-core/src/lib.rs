//! Jobbox Core
//!
//! Core types shared by the Jobbox host and the jobs it runs.
//!
//! This crate contains:
//! - Domain types: job metadata, parameter declarations, log entries, run records
//! - DTOs: lightweight views used for listing and reporting

pub mod domain;
pub mod dto;
