//! Shared types, configuration and errors for the Hermit runtime.

pub mod config;
pub mod error;
pub mod types;
