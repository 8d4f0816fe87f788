use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

#[derive(Serialize)]
struct ToolCallInfo {
    id: String,
    name: String,
    arguments: String,
}

#[derive(Serialize)]
struct LogEntry {
    timestamp: String, // ISO-8601 local time
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ToolCallInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// Append-only JSONL transcript of one conversation
///
/// Logging never interferes with the chat: a write failure is dropped and
/// the session continues.
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger; generates the file name based on the current local time.
    pub async fn new(workspace: &Path) -> Result<Self> {
        let logs_dir = workspace.join("logs");
        fs::create_dir_all(&logs_dir).await?;

        let now_local = Local::now();
        let filename = format!("mobichat-{}.jsonl", now_local.format("%Y-%m-%d-%H%M%S"));
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self {
            file_path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Append a single log entry.
    pub async fn log(&mut self, role: &str, content: &str, model: Option<&str>) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            role: role.to_string(),
            content: content.to_string(),
            model: model.map(|s| s.to_string()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        };
        self.write_entry(&entry).await;
    }

    /// Append an assistant entry carrying the tool calls it issued.
    pub async fn log_with_tool_calls(
        &mut self,
        role: &str,
        content: &str,
        model: Option<&str>,
        tool_calls: Vec<(String, String, String)>,
    ) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            role: role.to_string(),
            content: content.to_string(),
            model: model.map(|s| s.to_string()),
            tool_calls: Some(
                tool_calls
                    .into_iter()
                    .map(|(id, name, arguments)| ToolCallInfo {
                        id,
                        name,
                        arguments,
                    })
                    .collect(),
            ),
            tool_call_id: None,
            name: None,
        };
        self.write_entry(&entry).await;
    }

    /// Append a tool-result entry tied to its originating call.
    pub async fn log_tool_result(&mut self, content: &str, tool_call_id: &str, tool_name: &str) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            role: "tool".to_string(),
            content: content.to_string(),
            model: None,
            tool_calls: None,
            tool_call_id: Some(tool_call_id.to_string()),
            name: Some(tool_name.to_string()),
        };
        self.write_entry(&entry).await;
    }

    async fn write_entry(&mut self, entry: &LogEntry) {
        if let Some(file) = self.file.as_mut() {
            if let Ok(mut line) = serde_json::to_string(entry) {
                line.push('\n');
                let _ = file.write_all(line.as_bytes()).await;
            }
        }
    }

    /// Flush and close the underlying file.
    pub async fn shutdown(&mut self) {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush().await;
        }
    }
}
