//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (init, show, path)
//! - [`resolve`] - City/state text to coordinates
//! - [`route`] - Route sampling for a hypothetical shipment
//! - [`track`] - One-shot tracking code lookup
//! - [`watch`] - Live projection loop with auto-refresh

pub mod common;
pub mod config;
pub mod resolve;
pub mod route;
pub mod track;
pub mod watch;
