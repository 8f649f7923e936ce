pub mod analyzer;
pub mod inference_http;
pub mod prompt;
pub mod settings;
