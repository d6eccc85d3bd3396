//! Shared types, errors, and configuration for Consign.
//!
//! This crate provides common types used across all other crates:
//! - Money type with decimal precision
//! - Column mapping for the detail and charge sources
//! - Page layout constants
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ReportSettings};
pub use error::{AppError, AppResult};
