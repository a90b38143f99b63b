//! # binderapp
//!
//! Library behind the `binder` command line tool: collectible-card binders made of
//! fixed grid pages, and the slot arithmetic that keeps cards in place when pages
//! and slots are moved around.
//!
//! ## Architecture
//!
//! ```text
//! CLI (binder crate)
//!     │  parses arguments, renders CmdResult
//!     ▼
//! api::BinderApi          parses selectors, keeps the optimistic cache
//!     ▼
//! commands::*             plan, commit and report each operation
//!     ▼
//! slots                   pure remap functions over (id, index) placements
//!     ▼
//! store::DataStore        binders and cards, index batches
//!     ▼
//! store::StorageBackend   JSON files or memory
//! ```
//!
//! Nothing in this crate prints. Errors are [`error::BinderError`]; progress and
//! diagnostics go through `tracing`, and the binary decides where they end up.

pub mod address;
pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod slots;
pub mod store;
