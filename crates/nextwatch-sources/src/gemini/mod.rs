pub mod api;
pub mod client;

pub use client::{GeminiClient, resolve_api_key};
