use async_trait::async_trait;
use std::collections::HashMap;

use mobichat_toolcore::tool_context::ToolContext;
use mobichat_toolcore::{param, ParameterDefinition, Tool, ToolParameters, ToolResult};

/// Tool for computing a public-transit route between two place identifiers
pub struct GetRouteTool;

#[async_trait]
impl Tool for GetRouteTool {
    fn name(&self) -> &str {
        "get_route"
    }

    fn description(&self) -> &str {
        "Compute a public transit route between two locations. Both origin \
         and destination must be place identifiers obtained from \
         get_coordinates. Returns the raw routes JSON including legs, steps \
         and transit details such as line names and stop counts."
    }

    fn parameters(&self) -> HashMap<String, ParameterDefinition> {
        HashMap::from([
            param!(
                "origin",
                "string",
                "Place identifier of the starting location",
                required
            ),
            param!(
                "destination",
                "string",
                "Place identifier of the destination location",
                required
            ),
            param!(
                "departure_time",
                "string",
                "Desired departure time in RFC 3339 format, e.g. 2025-12-16T09:00:00Z",
                required
            ),
        ])
    }

    async fn execute(&self, params: ToolParameters, context: &ToolContext) -> ToolResult {
        let origin = match params.get_required::<String>("origin") {
            Ok(v) => v,
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let destination = match params.get_required::<String>("destination") {
            Ok(v) => v,
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let departure_time = match params.get_required::<String>("departure_time") {
            Ok(v) => v,
            Err(e) => return ToolResult::error(e.to_string()),
        };

        match context
            .maps
            .compute_route(&origin, &destination, &departure_time)
            .await
        {
            Ok(routes) => ToolResult::success(routes.to_string()),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}
