//! Assistant-facing tools: briefing, action schemas and action dispatch

pub mod dispatch;
pub mod instructions;
pub mod lighting;
pub mod models;
pub mod shutters;

pub use dispatch::{ActionDispatcher, DONE};
pub use models::{
    LightAction, ShutterAction, ToolSchema, UpdateLightsRequest, UpdateShuttersRequest,
};
