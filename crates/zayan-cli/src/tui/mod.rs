//! Terminal user interface (TUI) for Zayan HQ.
//!
//! A login screen gates the dashboard; see [`dashboard`] for the key map.
//!
//! ## Entry points
//!
//! - [`app::run`]: event loop over an [`app::App`].
//! - [`terminal::init`] / [`terminal::restore`]: raw mode and the
//!   alternate screen.

pub mod app;
pub mod chat_dialog;
pub mod create_dialog;
pub mod dashboard;
pub mod login;
pub mod terminal;
