use async_trait::async_trait;
use std::collections::HashMap;

use mobichat_toolcore::tool_context::ToolContext;
use mobichat_toolcore::{param, ParameterDefinition, Tool, ToolParameters, ToolResult};

/// Tool for resolving a place name to a place identifier
///
/// The search is biased to Brussels; the identifier of the first match is
/// returned and can be fed to `get_route`.
pub struct GetCoordinatesTool;

#[async_trait]
impl Tool for GetCoordinatesTool {
    fn name(&self) -> &str {
        "get_coordinates"
    }

    fn description(&self) -> &str {
        "Retrieve the place identifier for a place name located in Brussels \
         (a landmark, station, building, or address). The identifier of the \
         first matching place is returned and can be used as the origin or \
         destination of get_route."
    }

    fn parameters(&self) -> HashMap<String, ParameterDefinition> {
        HashMap::from([param!(
            "place",
            "string",
            "Name of the place to search for, without any city suffix",
            required
        )])
    }

    async fn execute(&self, params: ToolParameters, context: &ToolContext) -> ToolResult {
        let place = match params.get_required::<String>("place") {
            Ok(place) => place,
            Err(e) => return ToolResult::error(e.to_string()),
        };

        match context.maps.search_place(&place).await {
            Ok(hit) => ToolResult::success(hit.id),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}
