//! # ShortLink
//!
//! Web and command-line client for a URL shortening service. All shortening,
//! storage and visit counting happen in the service; this crate orchestrates
//! the calls and keeps their state.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Mapping entity and the service contract
//! - **Application Layer** ([`application`]) - Workflows, mapping list cache, redirect resolver
//! - **Infrastructure Layer** ([`infrastructure`]) - reqwest gateway to the service
//! - **Web Layer** ([`web`]) - Server-rendered dashboard and short link redirects
//!
//! ## Features
//!
//! - Independent shorten, decode and statistics workflows that can run concurrently
//! - Stale-but-available mapping list, refreshed after every mutation
//! - Superseded responses are discarded instead of overwriting newer ones
//! - `/{code}` redirects that fall back to the dashboard on failure
//!
//! ## Quick Start
//!
//! ```bash
//! export API_BASE_URL="http://localhost:7000/"
//! cargo run
//!
//! # or from the terminal
//! cargo run --bin shortlink-cli -- shorten https://example.com/a/long/path
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`].

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::ClientError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::{
        CacheStatus, DecodeWorkflow, MappingListCache, Navigation, Phase, RedirectResolver,
        ShortenWorkflow, StatisticsWorkflow, WorkflowState,
    };
    pub use crate::domain::ShortenerGateway;
    pub use crate::domain::entities::Mapping;
    pub use crate::error::ClientError;
    pub use crate::infrastructure::http::HttpGateway;
    pub use crate::state::AppState;
}
