//! Server-rendered front-end.
//!
//! Renders the workflow and cache state as HTML and turns form posts into
//! workflow dispatches.
//!
//! - [`handlers`] - Request handlers
//! - [`dto`] - Form and JSON payloads
//! - [`view`] - Display models for templates
//! - [`routes`] - Route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod view;
