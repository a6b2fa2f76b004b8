//! Core types and configuration for the sentiment-signal system.
//!
//! This crate provides shared types used across all other crates:
//! - Market and sentiment data types (price bars, sentiment events, annotated bars)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
