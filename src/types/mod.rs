// Tabshell shared type definitions
// Each submodule defines types used across the shell and its backends.

pub mod errors;
pub mod geometry;
pub mod message;
pub mod options;
pub mod popup;
pub mod tab;
