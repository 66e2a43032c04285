//! Proxy service for creator tooling backed by an OpenAI-compatible provider
//!
//! Exposes two endpoints: one drafts short replies to viewer comments, the
//! other generates a video thumbnail image, stores it under a local uploads
//! directory and derives a 320x180 preview.

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod storage;
pub mod web;

pub use error::{Error, Result};
