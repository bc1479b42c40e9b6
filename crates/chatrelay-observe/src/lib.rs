//! Observability setup for chatrelay.

pub mod tracing_setup;
