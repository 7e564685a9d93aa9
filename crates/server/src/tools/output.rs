//! Conversion of adapter output into MCP content.

use base64::Engine;
use rmcp::model::{CallToolResult, Content};
use thordata_client::ToolOutput;

/// Render adapter output as a successful tool result.
///
/// JSON is pretty-printed text; images are base64 with their MIME type.
pub fn render(output: ToolOutput) -> CallToolResult {
    let content = match output {
        ToolOutput::Json(value) => Content::text(serde_json::to_string_pretty(&value).unwrap_or_default()),
        ToolOutput::Text(text) => Content::text(text),
        ToolOutput::Image { data, mime_type } => {
            Content::image(base64::engine::general_purpose::STANDARD.encode(&data), mime_type)
        }
    };

    CallToolResult::success(vec![content])
}
