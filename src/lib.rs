//! Hostwatch - a minimal single-host resource monitor.
//!
//! This library samples host resource usage (memory, disk, swap) on a fixed
//! interval, flags every sample that crosses a configured percentage
//! threshold, and emails one alert per critical sample.

pub mod app;
pub mod cli;
pub mod collectors;
pub mod config;
pub mod core;
pub mod evaluation;
pub mod formatting;
pub mod monitor;
pub mod network;
pub mod notification;
pub mod runner;

// Re-export core types for convenience
pub use core::*;
