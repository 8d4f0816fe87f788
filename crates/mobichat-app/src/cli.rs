use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use mobichat_toolcore::{Tool, ToolContext, ToolParameters};
use mobichat_tools::{GetCoordinatesTool, GetCurrentTimeTool, GetRouteTool};

/// CLI arguments for mobichat
#[derive(Parser)]
#[command(name = "mobichat")]
#[command(about = "Accessible public-transit assistant for Brussels")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the chat model name
    #[arg(long, value_name = "MODEL", env = "MOBICHAT_MODEL")]
    pub model: Option<String>,

    /// Override the chat-completions endpoint URL
    #[arg(long, value_name = "URL", env = "MOBICHAT_API_URL")]
    pub api_url: Option<String>,

    /// API key for the language model (defaults to MISTRAL_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// API key for the mapping service (defaults to GCLOUD_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub maps_key: Option<String>,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,

    /// Enable verbose debug output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the place identifier for a location in Brussels
    Locate {
        /// Name of the place to search for
        place: String,
    },
    /// Compute a public-transit route between two place identifiers
    Route {
        /// Place identifier of the starting location
        origin: String,
        /// Place identifier of the destination location
        destination: String,
        /// Departure time in RFC 3339 format; defaults to now
        #[arg(short = 'd', long)]
        departure_time: Option<String>,
        /// Pretty-print the routes JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the assistant's current wall-clock time
    Time,
}

impl Commands {
    pub async fn execute(&self, context: &ToolContext) -> Result<String> {
        match self {
            Commands::Locate { place } => {
                let mut params = ToolParameters::new();
                params.set("place", place.clone());
                let result = GetCoordinatesTool.execute(params, context).await;
                if result.success {
                    Ok(result.content)
                } else {
                    Err(anyhow::anyhow!("{}", result.error.unwrap_or_default()))
                }
            }
            Commands::Route {
                origin,
                destination,
                departure_time,
                pretty,
            } => {
                let departure = departure_time
                    .clone()
                    .unwrap_or_else(|| Local::now().to_rfc3339());

                let mut params = ToolParameters::new();
                params.set("origin", origin.clone());
                params.set("destination", destination.clone());
                params.set("departure_time", departure);
                let result = GetRouteTool.execute(params, context).await;
                if !result.success {
                    return Err(anyhow::anyhow!("{}", result.error.unwrap_or_default()));
                }
                if *pretty {
                    let routes: serde_json::Value = serde_json::from_str(&result.content)?;
                    Ok(serde_json::to_string_pretty(&routes)?)
                } else {
                    Ok(result.content)
                }
            }
            Commands::Time => {
                let result = GetCurrentTimeTool
                    .execute(ToolParameters::new(), context)
                    .await;
                if result.success {
                    Ok(result.content)
                } else {
                    Err(anyhow::anyhow!("{}", result.error.unwrap_or_default()))
                }
            }
        }
    }
}
