//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod campaign_poll;
pub mod countdown_ticker;

// Re-export main functions
pub use campaign_poll::campaign_poll_task;
pub use countdown_ticker::countdown_ticker_task;
