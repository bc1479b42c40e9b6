//! Infrastructure layer for chatrelay.
//!
//! Contains implementations of the port traits defined in `chatrelay-core`:
//! SQLite exchange storage and the HTTP chat-completion client, plus the
//! configuration loader and data directory resolution.

pub mod completion;
pub mod config;
pub mod sqlite;
