//! Business logic and port trait definitions for chatrelay.
//!
//! This crate defines the "ports" (the exchange store and the completion
//! client) that the infrastructure layer implements, plus the chat service
//! that composes them. It depends only on `chatrelay-types` -- never on
//! `chatrelay-infra` or any database/IO crate.

pub mod chat;
pub mod completion;
pub mod repository;
