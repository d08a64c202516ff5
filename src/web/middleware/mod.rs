//! HTTP middleware for the web front-end.

pub mod tracing;
