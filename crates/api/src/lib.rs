//! Ascend back-office API server library.
//!
//! Exposes config, state, error handling, the booking services, and the
//! router builder so integration tests and the binary entrypoint share them.

pub mod booking;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
