mod blog_post;
mod image_request;
mod pipeline_request;
mod pipeline_state;
mod prompt_template;
mod stage;

pub use blog_post::*;
pub use image_request::*;
pub use pipeline_request::*;
pub use pipeline_state::*;
pub use prompt_template::*;
pub use stage::*;
