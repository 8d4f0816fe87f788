use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use mobichat_api::MISTRAL_API_URL;
use mobichat_toolcore::ToolRegistry;
use mobichat_tools::{GetCoordinatesTool, GetCurrentTimeTool, GetRouteTool};
use mobichat_types::DEFAULT_MODEL;

use crate::cli::Cli;

/// Configuration for the chat client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key for the language model
    pub mistral_api_key: String,
    /// API key for the mapping service
    pub maps_api_key: String,
    /// Chat-completions endpoint
    pub api_url: String,
    /// Model name sent with every request
    pub model: String,
}

/// Application configuration derived from CLI arguments and environment
pub struct AppConfig {
    pub client_config: ClientConfig,
    pub work_dir: PathBuf,
}

/// Resolve the mapping-service credential. Flag wins over environment; a
/// missing key is reported with guidance instead of failing deep in a tool.
pub fn resolve_maps_api_key(cli: &Cli) -> Result<String> {
    cli.maps_key
        .clone()
        .or_else(|| env::var("GCLOUD_API_KEY").ok())
        .context(
            "GCLOUD_API_KEY environment variable not set. \
             Pass --maps-key or add GCLOUD_API_KEY to your .env file.",
        )
}

/// Set up application configuration from CLI arguments
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let mistral_api_key = cli
        .api_key
        .clone()
        .or_else(|| env::var("MISTRAL_API_KEY").ok())
        .context(
            "MISTRAL_API_KEY environment variable not set. \
             Pass --api-key or add MISTRAL_API_KEY to your .env file.",
        )?;

    let maps_api_key = resolve_maps_api_key(cli)?;

    let api_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| MISTRAL_API_URL.to_string());

    let model = cli
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let work_dir = env::current_dir()?;

    Ok(AppConfig {
        client_config: ClientConfig {
            mistral_api_key,
            maps_api_key,
            api_url,
            model,
        },
        work_dir,
    })
}

/// Initialize the tool registry with all available tools
pub fn initialize_tool_registry() -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register_with_categories(GetCoordinatesTool, vec!["maps".to_string()])?;
    registry.register_with_categories(GetRouteTool, vec!["maps".to_string()])?;
    registry.register_with_categories(GetCurrentTimeTool, vec!["time".to_string()])?;

    Ok(registry)
}
