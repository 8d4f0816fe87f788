use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use super::tool::{Tool, ToolParameters, ToolResult};
use super::tool_context::ToolContext;

/// Registry for managing and discovering tools
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    categories: HashMap<String, Vec<String>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tool_count", &self.tools.len())
            .field("categories", &self.categories)
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new tool. Duplicate names are rejected at registration
    /// time so a dispatch can never be ambiguous.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            anyhow::bail!("Tool '{}' is already registered", name);
        }
        self.tools.insert(name, Arc::new(tool));
        Ok(())
    }

    /// Register a tool with categories
    pub fn register_with_categories<T: Tool + 'static>(
        &mut self,
        tool: T,
        categories: Vec<String>,
    ) -> Result<()> {
        let name = tool.name().to_string();
        self.register(tool)?;

        for category in categories {
            self.categories.entry(category).or_default().push(name.clone());
        }
        Ok(())
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get all tools
    pub fn get_all_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.values().cloned().collect()
    }

    /// Get tools by category
    pub fn get_tools_by_category(&self, category: &str) -> Vec<Arc<dyn Tool>> {
        if let Some(tool_names) = self.categories.get(category) {
            tool_names
                .iter()
                .filter_map(|name| self.tools.get(name))
                .cloned()
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names, sorted
    pub fn get_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Execute a tool by name
    ///
    /// A name the model invents resolves to an explicit error result that
    /// lists the registered tools, so the model can correct itself.
    pub async fn execute_tool(
        &self,
        name: &str,
        params: ToolParameters,
        context: &ToolContext,
    ) -> ToolResult {
        match self.get_tool(name) {
            Some(tool) => tool.execute(params, context).await,
            None => ToolResult::error(format!(
                "Unknown tool '{}'. Available tools: {}",
                name,
                self.get_tool_names().join(", ")
            )),
        }
    }

    /// Get all tool definitions in OpenAI format
    pub fn get_openai_tool_definitions(&self) -> Vec<serde_json::Value> {
        let mut tools: Vec<_> = self.tools.iter().collect();
        // Sort by tool name to ensure consistent ordering across requests
        tools.sort_by_key(|(name, _)| name.as_str());
        tools
            .into_iter()
            .map(|(_, tool)| tool.to_openai_definition())
            .collect()
    }

    /// Get categories
    pub fn get_categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }
}
