//! Tabshell: a multi-view browsing shell.
//!
//! One host window carries a fixed control surface (tab strip and address bar)
//! and any number of content surfaces (tabs), exactly one of them visible. The
//! tab multiplexer owns the tabs and keeps the control surface in sync over an
//! asynchronous message channel.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod command_handler;
pub mod logging;
pub mod managers;
pub mod observer;
pub mod platform;
pub mod services;
pub mod session;
pub mod surface;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
