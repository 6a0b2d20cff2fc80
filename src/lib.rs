//! Jeedom assistant bridge in Rust
//!
//! This crate keeps an in-memory snapshot of a Jeedom server's rooms,
//! lights and shutters, composes the briefing and action schemas an
//! assistant needs, and turns assistant actions into remote command
//! executions.
//!
//! # Features
//!
//! - Periodic full rebuild of the device catalogs from `jeeObject::full`
//! - Atomic snapshot handover between the refresh cycle and readers
//! - `update_lights` / `update_shutters` actions with fire-and-forget execution
//! - Degrade-on-failure JSON-RPC client with centralized logging

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod services;
pub mod tools;

// Test support modules - available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

// Re-export main types for convenience
pub use config::ServerConfig;
pub use error::{JeedomError, Result};
pub use server::JeedomBridge;
