//! Repository trait definitions.

pub mod exchange;
