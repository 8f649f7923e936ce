pub mod inference_api;
