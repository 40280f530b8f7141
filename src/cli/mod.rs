//! CLI module for the tutoring API
//!
//! - `serve`: run the HTTP API
//! - `topics`: print the curriculum topic catalogue as JSON

pub mod serve;

use std::collections::BTreeMap;

use clap::{Parser, Subcommand};

use crate::api::types::TopicSummary;
use crate::config::AppConfig;

/// Grade-aware tutoring API over curriculum vector indexes
#[derive(Parser)]
#[command(name = "grade-tutor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Print the configured curriculum topics
    Topics,
}

/// Print every topic summary as pretty JSON
pub fn print_topics() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let curriculum = crate::load_curriculum(&config)?;
    let topics: BTreeMap<&str, TopicSummary> = curriculum
        .topics()
        .map(|(id, topic)| (id, TopicSummary::from(topic)))
        .collect();

    println!("{}", serde_json::to_string_pretty(&topics)?);
    Ok(())
}
