//! Application layer: the client-side orchestration of service calls.
//!
//! Everything here talks to the service through
//! [`crate::domain::ShortenerGateway`] and never blocks the caller beyond
//! the call it started.
//!
//! # Components
//!
//! - [`mapping_cache::MappingListCache`] - Shared list of all mappings, refreshed after mutations
//! - [`workflows`] - Shorten, decode and statistics workflows with their own state
//! - [`redirect::RedirectResolver`] - Resolves `/{code}` navigations

pub mod mapping_cache;
pub mod redirect;
pub mod workflows;

pub use mapping_cache::{CacheStatus, MappingListCache, MappingListSnapshot};
pub use redirect::{Navigation, RedirectResolver, RedirectState};
pub use workflows::{DecodeWorkflow, Phase, ShortenWorkflow, StatisticsWorkflow, WorkflowState};
