//! Core domain logic (transport-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **value**: Document value model
//! - **grid**: Grid query adapter
//! - **services**: Service container built from configuration

pub mod config;
pub mod error;
pub mod grid;
pub mod services;
pub mod value;

// Re-export key types for convenience
pub use config::Config;
pub use error::{GridError, Result};
pub use services::Services;
