//! CVE audit core: domain values, release policies and the scan pipeline.
//!
//! Nothing in this module performs I/O directly; reference data and
//! scanning are reached through the outbound ports.

pub mod domain;
pub mod policies;
pub mod services;
