//! Library crate for standings-board, exposing modules for binaries and integration tests.

/// Configuration of both binaries.
pub mod config;
/// Wire payloads of the feed and admin API.
pub mod dto;
/// Error types and their HTTP projection.
pub mod error;
/// HTTP routes of the feed server.
pub mod routes;
/// Ranking, planning, animation controllers and feed plumbing.
pub mod services;
/// Shared state of the board and of the feed server.
pub mod state;
/// Render surface abstraction.
pub mod surface;
