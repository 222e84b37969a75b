/// Admin request and response payloads.
pub mod admin;
/// Polling endpoint payloads.
pub mod feed;
/// Health check payload.
pub mod health;
/// Validation helpers.
pub mod validation;
