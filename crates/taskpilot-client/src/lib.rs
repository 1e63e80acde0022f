//! Client SDK for driving a task-oriented automation assistant over HTTP
//!
//! This crate wraps the assistant's external API — task creation, messaging,
//! status polling, approvals, and the configuration surfaces for modes,
//! profiles, auto-approve settings, and MCP tool integrations. The server
//! owns every resource and all "current selection" state; this client only
//! reads and requests mutations, so it stays safe to construct freely and
//! cheap to clone per call site.
//!
//! The runnable programs under `examples/` mirror the documented interaction
//! scenarios end to end against a live server.

pub mod error;
pub mod http_client;

pub use error::{ApiError, Result};
pub use http_client::{AssistantClient, PollConfig, DEFAULT_BASE_URL};

pub use taskpilot_api_types as types;
