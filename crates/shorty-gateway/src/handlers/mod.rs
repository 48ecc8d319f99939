mod health;
mod url;

pub use health::{health_handler, ping_handler};
pub use url::{create_json_handler, create_text_handler, redirect_handler};
