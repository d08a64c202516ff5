//! HTTP request handlers for the front-end.

pub mod actions;
pub mod dashboard;
pub mod health;
pub mod redirect;

pub use actions::{decode_handler, refresh_handler, shorten_handler, statistics_handler};
pub use dashboard::dashboard_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
