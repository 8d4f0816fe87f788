use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use uuid::Uuid;

use mobichat_maps::MapsClient;
use mobichat_toolcore::ToolContext;

mod app;
mod cli;
mod config;

use cli::Cli;
use config::{resolve_maps_api_key, setup_from_cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "mobichat", &mut io::stdout());
        return Ok(());
    }

    // Subcommands invoke a tool directly and exit; only the maps credential
    // is needed for them.
    if let Some(ref command) = cli.command {
        let maps = Arc::new(MapsClient::new(resolve_maps_api_key(&cli)?)?);
        let context = ToolContext::new(format!("cli-{}", Uuid::new_v4()), maps);
        let result = command.execute(&context).await?;
        println!("{}", result);
        return Ok(());
    }

    // Default: interactive chat
    let app_config = setup_from_cli(&cli)?;
    app::run_repl_mode(&cli, app_config.client_config, app_config.work_dir).await
}
