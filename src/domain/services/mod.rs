//! Domain services: the prompt templates that drive each stage.

mod prompt_library;

pub use prompt_library::*;
