//! Campaign backend module
//!
//! This module contains the REST client for the remote campaign/content
//! backend and its wire entities.

pub mod client;
pub mod entities;

// Re-export main types
pub use client::BackendClient;
pub use entities::{Community, Content};
