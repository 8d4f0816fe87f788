use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tokio_util::sync::CancellationToken;

use mobichat_api::LlmClient;
use mobichat_toolcore::{ToolContext, ToolParameters, ToolRegistry};
use mobichat_types::{Message, ToolCall, MAX_TOOL_ITERATIONS};

use crate::conversation_logger::ConversationLogger;

/// Opening instruction for the assistant. The assistant speaks first and is
/// expected to keep asking until it understands the user's constraints.
pub const SYSTEM_PROMPT: &str = "\
You are a chatbot that needs to assist disabled people to access public \
transportation in Brussels. You need to understand the needs of the user to \
give the best assistance. You have to proactively ask them questions to \
understand their difficulties and their needs. When you think you have all \
the information needed, say it out loud in the chat. Use the tools available \
to help the user. If they don't exist, tell the user. You ask the first \
question.";

/// One conversation with the model
///
/// Owns the append-only message log and the tool definitions derived once at
/// construction. Each user turn runs the dispatch loop: invoke the model,
/// execute any requested tool calls in the order issued, feed the results
/// back, and repeat until the model answers in plain text or the round cap
/// is hit.
pub struct ChatSession {
    pub messages: Vec<Message>,
    pub total_tokens_used: usize,
    pub logger: Option<ConversationLogger>,
    client: Arc<dyn LlmClient>,
    registry: ToolRegistry,
    context: ToolContext,
    tool_definitions: Vec<serde_json::Value>,
    model_name: String,
}

impl ChatSession {
    pub fn new(
        client: Arc<dyn LlmClient>,
        registry: ToolRegistry,
        context: ToolContext,
        model_name: String,
    ) -> Self {
        let tool_definitions = registry.get_openai_tool_definitions();
        Self {
            messages: vec![Message::system(SYSTEM_PROMPT)],
            total_tokens_used: 0,
            logger: None,
            client,
            registry,
            context,
            tool_definitions,
            model_name,
        }
    }

    /// Issue the opening model call and return the assistant's greeting.
    ///
    /// No tools are bound here; the first turn is purely conversational and
    /// the assistant opens with a question.
    pub async fn open(&mut self) -> Result<String> {
        if let Some(logger) = &mut self.logger {
            if let Some(sys_msg) = self.messages.first() {
                logger.log("system", &sys_msg.content, None).await;
            }
        }

        let outcome = self.client.chat(&self.messages, &[]).await?;
        if let Some(usage) = &outcome.usage {
            self.total_tokens_used += usage.total_tokens;
        }
        self.messages.push(outcome.message.clone());

        if let Some(logger) = &mut self.logger {
            logger
                .log("assistant", &outcome.message.content, Some(&self.model_name))
                .await;
        }
        Ok(outcome.message.content)
    }

    /// Handle one user turn, running tool calls until the model produces a
    /// plain-text answer.
    pub async fn send(
        &mut self,
        user_message: &str,
        cancel: Option<CancellationToken>,
    ) -> Result<String> {
        self.messages.push(Message::user(user_message));

        let mut tool_call_iterations = 0usize;

        loop {
            if let Some(token) = &cancel {
                if token.is_cancelled() {
                    anyhow::bail!("Operation interrupted");
                }
            }

            let outcome = self
                .client
                .chat(&self.messages, &self.tool_definitions)
                .await?;
            if let Some(usage) = &outcome.usage {
                self.total_tokens_used += usage.total_tokens;
            }
            let response = outcome.message;

            let tool_calls = match &response.tool_calls {
                Some(calls) if !calls.is_empty() => calls.clone(),
                _ => {
                    self.messages.push(response.clone());
                    if let Some(logger) = &mut self.logger {
                        logger
                            .log("assistant", &response.content, Some(&self.model_name))
                            .await;
                    }
                    return Ok(response.content);
                }
            };

            tool_call_iterations += 1;
            if tool_call_iterations > MAX_TOOL_ITERATIONS {
                let notice = format!(
                    "I've made {} rounds of tool calls for this request without \
                     reaching an answer. Please simplify the request or give me \
                     more specific directions.",
                    MAX_TOOL_ITERATIONS
                );
                self.messages.push(Message::assistant(notice.clone()));
                if let Some(logger) = &mut self.logger {
                    logger.log("assistant", &notice, Some(&self.model_name)).await;
                }
                return Ok(notice);
            }

            self.messages.push(response.clone());
            if let Some(logger) = &mut self.logger {
                let tool_call_info: Vec<(String, String, String)> = tool_calls
                    .iter()
                    .map(|tc| {
                        (
                            tc.id.clone(),
                            tc.function.name.clone(),
                            tc.function.arguments.clone(),
                        )
                    })
                    .collect();
                logger
                    .log_with_tool_calls(
                        "assistant",
                        &response.content,
                        Some(&self.model_name),
                        tool_call_info,
                    )
                    .await;
            }

            // Execute in the order the calls were issued; one tool message
            // per call, appended before the model is invoked again.
            for tool_call in &tool_calls {
                if let Some(token) = &cancel {
                    if token.is_cancelled() {
                        anyhow::bail!("Operation interrupted");
                    }
                }

                println!(
                    "{} {} with args: {}",
                    "🔧 Calling tool:".yellow(),
                    tool_call.function.name.cyan(),
                    tool_call.function.arguments.bright_black()
                );

                let result = self.run_tool(tool_call).await;

                println!("{} {}", "📋 Result:".green(), result.bright_black());

                if let Some(logger) = &mut self.logger {
                    logger
                        .log_tool_result(&result, &tool_call.id, &tool_call.function.name)
                        .await;
                }

                self.messages.push(Message::tool(
                    result,
                    tool_call.id.clone(),
                    tool_call.function.name.clone(),
                ));
            }
        }
    }

    /// Run a single tool call; every failure mode becomes error text the
    /// model can read, never a session fault.
    async fn run_tool(&self, tool_call: &ToolCall) -> String {
        let params = match ToolParameters::from_json(&tool_call.function.arguments) {
            Ok(params) => params,
            Err(e) => {
                return format!(
                    "Error: invalid arguments for '{}': {}",
                    tool_call.function.name, e
                )
            }
        };

        let result = self
            .registry
            .execute_tool(&tool_call.function.name, params, &self.context)
            .await;

        if result.success {
            result.content
        } else {
            format!("Error: {}", result.error.unwrap_or_default())
        }
    }
}
