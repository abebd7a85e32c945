//! # Application Layer
//!
//! Interfaces to external services and the use cases that orchestrate them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
