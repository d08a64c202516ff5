//! Infrastructure layer for external integrations.
//!
//! Implements the [`crate::domain::ShortenerGateway`] contract on top of
//! reqwest.
//!
//! # Modules
//!
//! - [`http`] - JSON-over-HTTP gateway to the shortening service

pub mod http;
