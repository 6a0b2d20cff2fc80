//! Common test utilities

pub mod jeedom_mock;

pub use jeedom_mock::MockJeedomServer;
