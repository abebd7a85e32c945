mod generate_blog_post;

pub use generate_blog_post::*;
