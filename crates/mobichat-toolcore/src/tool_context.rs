use std::sync::Arc;

use mobichat_maps::MapsClient;

/// Tool execution context
///
/// Shared by every tool invocation in a session: the session identifier for
/// log correlation and the maps client both mapping tools go through.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub session_id: String,
    pub maps: Arc<MapsClient>,
}

impl ToolContext {
    pub fn new(session_id: String, maps: Arc<MapsClient>) -> Self {
        Self { session_id, maps }
    }
}
