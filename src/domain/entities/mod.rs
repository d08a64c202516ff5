//! Entities exchanged with the shortening service.

pub mod mapping;

pub use mapping::Mapping;
