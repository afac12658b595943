//! Structured logging with record context.
//!
//! Provides logging macros and utilities that prefix every message with the
//! codec operation and remote record name for easy correlation.

pub mod structured;

pub use structured::*;
