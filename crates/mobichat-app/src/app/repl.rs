use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use uuid::Uuid;

use mobichat_api::MistralClient;
use mobichat_chat::{ChatSession, ConversationLogger};
use mobichat_maps::MapsClient;
use mobichat_toolcore::ToolContext;

use crate::cli::Cli;
use crate::config::{initialize_tool_registry, ClientConfig};

/// Run interactive REPL mode
pub async fn run_repl_mode(cli: &Cli, client_config: ClientConfig, work_dir: PathBuf) -> Result<()> {
    println!(
        "{}",
        "🚋 mobichat - accessible transit assistant for Brussels"
            .bright_cyan()
            .bold()
    );
    println!(
        "{}",
        format!("Model: {} • Working directory: {}", client_config.model, work_dir.display())
            .bright_black()
    );
    println!("{}", "Type 'exit' or 'quit' to leave.\n".bright_black());

    if cli.verbose {
        println!(
            "{}",
            format!("🔧 DEBUG: chat endpoint: {}", client_config.api_url).bright_black()
        );
    }

    let client = Arc::new(MistralClient::new(
        client_config.mistral_api_key.clone(),
        client_config.model.clone(),
        client_config.api_url.clone(),
    )?);
    let maps = Arc::new(MapsClient::new(client_config.maps_api_key.clone())?);
    let registry = initialize_tool_registry()?;
    let context = ToolContext::new(format!("repl-{}", Uuid::new_v4()), maps);

    let mut session = ChatSession::new(client, registry, context, client_config.model.clone());

    // Logs go into the working directory; a failure disables logging only
    session.logger = match ConversationLogger::new(&work_dir).await {
        Ok(logger) => Some(logger),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    // The assistant opens the conversation
    let greeting = session.open().await?;
    println!("\n{} {}\n", "Assistant:".bright_blue().bold(), greeting);

    // Persistent Ctrl-C handler for the whole session; cancels the token of
    // whatever turn is in flight.
    let current_token: Arc<std::sync::Mutex<Option<tokio_util::sync::CancellationToken>>> =
        Arc::new(std::sync::Mutex::new(None));
    let current_token_for_handler = current_token.clone();

    tokio::spawn(async move {
        loop {
            if tokio::signal::ctrl_c().await.is_ok() {
                if let Ok(guard) = current_token_for_handler.lock() {
                    if let Some(ref token) = *guard {
                        println!("\n{}", "^C - Interrupting...".bright_yellow());
                        token.cancel();
                    }
                }
            }
        }
    });

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                if line == "exit" || line == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }

                rl.add_history_entry(line)?;

                if let Some(logger) = &mut session.logger {
                    logger.log("user", line, None).await;
                }

                let cancel_token = tokio_util::sync::CancellationToken::new();
                {
                    let mut guard = current_token.lock().unwrap();
                    *guard = Some(cancel_token.clone());
                }

                let result = session.send(line, Some(cancel_token)).await;

                {
                    let mut guard = current_token.lock().unwrap();
                    *guard = None;
                }

                match result {
                    Ok(response) => {
                        println!("\n{} {}\n", "Assistant:".bright_blue().bold(), response);
                        if cli.verbose {
                            println!(
                                "{}",
                                format!("📊 Session tokens: {}", session.total_tokens_used)
                                    .bright_black()
                            );
                        }
                    }
                    Err(e) if e.to_string().contains("interrupted") => {
                        println!("{}", "Operation interrupted by user".bright_yellow());
                        continue;
                    }
                    Err(e) => {
                        eprintln!("{} {}\n", "Error:".bright_red().bold(), e);
                        continue;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    // Graceful shutdown of logger (flush & close)
    if let Some(logger) = &mut session.logger {
        logger.shutdown().await;
    }

    Ok(())
}
