//! HTTP access to the shortening service.

mod envelope;
mod http_gateway;

pub use http_gateway::{HttpGateway, with_trailing_slash};
