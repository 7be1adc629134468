//! Core types for the Micro.blog Books server.
//!
//! This module provides foundational types used throughout the system:
//! - **IDs**: Validated numeric identifiers (BookshelfId, BookId, GoalId, ...)
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures and the bearer credential

mod config;
mod errors;
mod ids;

pub use config::{
    ApiConfig, Config, Credential, ObservabilityConfig, TransportConfig, DEFAULT_BASE_URL,
};
pub use errors::{Error, Result};
pub use ids::{BookId, BookshelfId, GoalId, GoalProgress, GoalTarget};
