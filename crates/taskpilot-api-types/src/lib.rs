//! Type definitions for the assistant external API contract
//!
//! This crate provides the shared contract between the assistant server and
//! the clients that drive it, ensuring type-safe communication across the
//! HTTP boundary. Centralizing the wire types prevents drift between the
//! client SDK, the command-line front end, and the mock server used in
//! tests, and makes field renames a compile-time concern rather than a
//! runtime surprise.
//!
//! Field names are serde-annotated to match the server's JSON exactly: the
//! task record's `lastMessage` and the auto-approve flags are camelCase on
//! the wire, while request payloads such as `wait_for_completion` are
//! snake_case.
//!
//! ## Example
//!
//! ```rust
//! use taskpilot_api_types::{CreateTaskRequest, TaskStatus};
//!
//! let request = CreateTaskRequest::with_message("Hello!")
//!     .mode("architect")
//!     .wait_for_completion();
//!
//! assert_eq!(request.mode.as_deref(), Some("architect"));
//! assert!(!TaskStatus::InProgress.is_settled());
//! ```

pub mod types;

pub use types::*;
