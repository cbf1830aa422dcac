//! zayan-core library.
//!
//! In-memory state for the Zayan HQ dashboard: the data model, the store
//! and its commands, kanban transitions, project filtering, seed data, the
//! actions that pair mutations with feed entries, and the credential check.
//!
//! # Conventions
//!
//! - **Errors**: store commands never fail; validation and auth return typed
//!   `thiserror` errors that map onto an [`error::ErrorCode`].
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`).
//! - **Time**: never call `Utc::now()` outside [`clock`].

pub mod actions;
pub mod auth;
pub mod board;
pub mod clock;
pub mod config;
pub mod deferred;
pub mod error;
pub mod feed;
pub mod filter;
pub mod model;
pub mod seed;
pub mod store;
