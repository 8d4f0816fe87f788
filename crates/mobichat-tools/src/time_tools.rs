use async_trait::async_trait;
use chrono::Local;
use std::collections::HashMap;

use mobichat_toolcore::tool_context::ToolContext;
use mobichat_toolcore::{ParameterDefinition, Tool, ToolParameters, ToolResult};

/// Tool reporting the current local wall-clock time
///
/// RFC 3339 output so the model can pass it straight through as a
/// `departure_time` for `get_route`.
pub struct GetCurrentTimeTool;

#[async_trait]
impl Tool for GetCurrentTimeTool {
    fn name(&self) -> &str {
        "get_current_time"
    }

    fn description(&self) -> &str {
        "Get the current local date and time in RFC 3339 format. Use this to \
         resolve relative departure times like 'now' or 'in twenty minutes'."
    }

    fn parameters(&self) -> HashMap<String, ParameterDefinition> {
        HashMap::new()
    }

    async fn execute(&self, _params: ToolParameters, _context: &ToolContext) -> ToolResult {
        ToolResult::success(Local::now().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use mobichat_maps::MapsClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_time_is_rfc3339() {
        let context = ToolContext::new(
            "test_session".to_string(),
            Arc::new(MapsClient::new("test-key".to_string()).unwrap()),
        );
        let result = GetCurrentTimeTool
            .execute(ToolParameters::new(), &context)
            .await;
        assert!(result.success);
        assert!(DateTime::parse_from_rfc3339(&result.content).is_ok());
    }

    #[test]
    fn test_no_parameters_means_empty_required() {
        let definition = GetCurrentTimeTool.to_openai_definition();
        let parameters = &definition["function"]["parameters"];
        assert_eq!(parameters["required"], serde_json::json!([]));
        assert_eq!(parameters["properties"], serde_json::json!({}));
    }
}
