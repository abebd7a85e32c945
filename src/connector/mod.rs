//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat completion and image generation over HTTP (OpenAI-compatible)
//! - Deterministic offline clients for trying the pipeline without an account
//! - Terminal presentation of stage progress

pub mod adapter;
pub mod presentation;

pub use adapter::*;
pub use presentation::*;
