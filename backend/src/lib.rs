//! Room token service for LiveKit-compatible media servers.
//!
//! Issues short-lived HS256 access tokens that grant a participant the right
//! to join a room, and serves the browser client as static files.

pub mod api;
pub mod config;
pub mod core;
pub mod models;
pub mod system;
