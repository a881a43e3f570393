pub mod config;
pub mod content_type;
pub mod storage;

pub use content_type::{content_type_for_extension, content_type_for_path};
