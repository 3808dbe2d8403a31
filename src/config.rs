//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "campaign-countdown")]
#[command(about = "A countdown service for time-limited community posting campaigns")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20580")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Base URL of the campaign backend
    #[arg(short, long, default_value = "https://pulse-be.onrender.com")]
    pub backend_url: String,

    /// Campaign id to track; repeat to pin several, omit to track all
    #[arg(short, long = "campaign")]
    pub campaigns: Vec<String>,

    /// Time limit in minutes applied when a campaign config omits one
    #[arg(short, long, default_value = "180")]
    pub fallback_minutes: u32,

    /// Backend poll interval in seconds
    #[arg(long, default_value = "10")]
    pub poll_interval: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
