//! Chat orchestration: one prompt in, one stored exchange out.

pub mod service;
