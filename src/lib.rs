//! Campaign Countdown - a countdown service for time-limited posting campaigns
//!
//! This library tracks community campaigns whose countdown restarts from the
//! full time limit whenever a new qualifying post arrives, and serves the
//! live remaining time over HTTP.

pub mod api;
pub mod backend;
pub mod config;
pub mod countdown;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use backend::BackendClient;
pub use config::Config;
pub use countdown::{seconds_to_parts, CountdownCalculator, TimeParts};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
