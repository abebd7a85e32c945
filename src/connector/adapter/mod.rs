mod mock_chat_client;
mod mock_image_client;
mod openai_chat_client;
mod openai_config;
mod openai_error;
mod openai_image_client;

pub use mock_chat_client::*;
pub use mock_image_client::*;
pub use openai_chat_client::*;
pub use openai_config::*;
pub use openai_image_client::*;
