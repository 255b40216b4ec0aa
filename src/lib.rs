//! Reveal Toggle - show/hide control for password fields
//!
//! This crate provides a small document model, the visibility toggle that
//! flips a password input between masked and plain display, and the
//! configuration and logging shared by the TUI sign-in form and the CLI.

pub mod core;
