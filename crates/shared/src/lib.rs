//! Shared types, errors, and configuration for the dues service.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for members and contributions
//! - Amount and date display helpers used by statistics and reports
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
