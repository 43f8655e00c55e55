//! Job application tracking: field validation, the application service, and the
//! HTTP surface that exposes them.

pub mod applications;
pub mod config;
pub mod error;
pub mod telemetry;
