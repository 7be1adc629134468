//! # Micro Books MCP
//!
//! Tool gateway exposing the Micro.blog Books API as MCP tools:
//! - Bookshelf listing, creation and renaming
//! - Adding, moving, removing and re-covering books
//! - Reading goals and goal progress
//!
//! ## Architecture
//!
//! ```text
//!   stdin  ─→ ┌──────────┐   ┌────────────┐   ┌───────────┐
//!             │ mcp      │ → │ dispatch   │ → │ client    │ ─→ HTTPS
//!   stdout ←─ │ (server) │ ← │ (router)   │ ← │ (BooksApi)│ ←─
//!             └──────────┘   └────────────┘   └───────────┘
//!                                  │
//!                             ┌─────────┐
//!                             │ tools   │  catalog + validation
//!                             └─────────┘
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod client;
pub mod dispatch;
pub mod mcp;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, Result};
