//! # gct Architecture
//!
//! gct is a **UI-agnostic todo library** that happens to ship a CLI and a TUI.
//! Everything that decides what a todo is, how IDs are handed out and what is
//! written to disk lives here; the `gct` binary only parses input and renders
//! output.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Front ends (gct binary: cli/, tui/)                        │
//! │  - Parse arguments or keys, render results, exit codes      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, owns the repository and the clock           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Input checks, repository calls, structured results       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - TodoRepository trait, TodoStore over StorageBackend      │
//! │  - JSON file (production), memory (testing)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## IDs Are Not Stable
//!
//! IDs are small, dense and 1-based so they are easy to type. The price is that
//! deleting a todo renumbers every todo after it. Anything that remembers an ID
//! across a delete must refetch. See [`store`] for the exact policy.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout or stderr, never exits the
//! process and never assumes a terminal. Logging goes through `tracing`; the
//! binary decides whether and where it is printed.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: the bulk of the tests, against the in-memory repository and
//!    a manual clock.
//! 2. **Store**: ID allocation and resequencing against `MemBackend`, file
//!    format and error mapping against `FsBackend` in a temp dir.
//! 3. **API**: dispatch only.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade used by every front end
//! - [`commands`]: Use cases (add, list, toggle, update, delete)
//! - [`model`]: The `Todo` entity and its invariants
//! - [`store`]: Persistence and ID management
//! - [`error`]: Error kinds, sentinels and classification
//! - [`config`]: Data file resolution
//! - [`clock`]: Injectable time source
//! - [`init`]: Production wiring

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use error::{GctError, Result};
pub use model::Todo;
