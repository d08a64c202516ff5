//! Domain layer: the mapping entity and the service contract.
//!
//! - [`entities`] - Data reported by the shortening service
//! - [`gateway`] - Trait describing every call the client makes to the service
//!
//! Nothing here knows about HTTP or the web front-end; the concrete gateway
//! lives in [`crate::infrastructure`].

pub mod entities;
pub mod gateway;

pub use gateway::ShortenerGateway;
