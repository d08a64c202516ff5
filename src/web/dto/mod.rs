//! Request and response payloads of the front-end.

pub mod forms;
pub mod health;
