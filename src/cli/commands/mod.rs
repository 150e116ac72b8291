//! Command implementations for zig-deps
//!
//! Each command is organized into its own module and returns the process
//! exit code; errors propagate to `main`.

pub mod check;
pub mod config;
pub mod hooks;
