//! Shared domain types for chatrelay.
//!
//! The exchange record, its pre-persistence form, configuration types,
//! and the error enums used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod exchange;
