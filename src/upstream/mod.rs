//! Upstream generation API
//!
//! Request/response models for the `generateContent` endpoint and the
//! retrying client that calls it.

pub mod client;
pub mod models;

pub use client::GenerationClient;
pub use models::{GenerateContentRequest, GenerateContentResponse};
