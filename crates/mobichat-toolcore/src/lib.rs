//! Tool abstraction for mobichat
//!
//! Tools are plain structs implementing [`Tool`]; the registry owns them and
//! derives the OpenAI-format definitions the model API consumes. Nothing in
//! here knows about any specific tool.

pub mod tool;
pub mod tool_context;
pub mod tool_registry;

pub use tool::{ParameterDefinition, Tool, ToolParameters, ToolResult};
pub use tool_context::ToolContext;
pub use tool_registry::ToolRegistry;
