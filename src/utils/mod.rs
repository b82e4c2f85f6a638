//! Utility Functions
//!
//! User-friendly error formatting for the replay binary.
//!
//! ```rust
//! use lamco_synthetic_gesture::utils::format_user_error;
//!
//! let error = anyhow::anyhow!("gesture script is empty");
//! eprintln!("{}", format_user_error(&error));
//! ```
//!
//! Error categories with context-aware help:
//! - Config errors → TOML syntax, value ranges
//! - Script errors → `[[gesture]]` layout, gesture types
//! - Gesture errors → parameter ranges for the entry that failed
//! - Timeouts → pacing limits and long holds

pub mod errors;

pub use errors::format_user_error;
