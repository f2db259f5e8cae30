//! Showcase API server library.
//!
//! Exposes config, state, error handling, the view document and routes so
//! integration tests and the binary entrypoint share them.

pub mod config;
pub mod document;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
