pub mod config;
pub mod logger;
pub mod slug;
pub mod draft;
pub mod scaffold;
pub mod shortcode;
pub mod front_matter;
pub mod document;
pub mod posts;
pub mod feed;
mod text_utils;
