//! Command implementations behind the `gtrace` binary.

pub mod commands;

pub use commands::OutputOptions;
