mod chat_client;
mod image_client;
mod stage_observer;

pub use chat_client::*;
pub use image_client::*;
pub use stage_observer::*;
