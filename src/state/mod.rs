//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod campaign_state;

// Re-export main types
pub use app_state::AppState;
pub use campaign_state::{CampaignState, CountdownSnapshot, Phase};
