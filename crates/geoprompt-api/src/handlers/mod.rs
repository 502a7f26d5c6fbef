mod catalog;
mod chat;
mod datasets;
mod export;
mod health;
mod layers;
mod render;

pub use catalog::list_catalog;
pub use chat::handle_chat;
pub use datasets::get_schema;
pub use export::handle_export;
pub use health::health_check;
pub use layers::{clear_layers, delete_layer, list_layers, toggle_layer};
pub use render::{get_render, get_viewport, put_viewport};
