//! Prompt construction from inspection metadata.

use creative404_types::{InspectionResult, McpToolInfo};

/// Build the text-to-image prompt for a 404 illustration themed on `inspection`.
pub fn build_prompt(inspection: &InspectionResult) -> String {
    let tool_summary = inspection
        .tools
        .iter()
        .map(tool_label)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Create a whimsical, colorful, and creative illustration for a 404 'Page Not Found' error page. \
         The theme should be inspired by an MCP server called '{}' \
         which provides these tools: {tool_summary}. \
         The image should humorously depict the concept of a missing page \
         in a way that relates to what the server does. \
         Use a fun, cartoonish art style with vibrant colors. \
         Include the text '404' prominently in the image. \
         Do not include any other text.",
        inspection.server_name
    )
}

fn tool_label(tool: &McpToolInfo) -> String {
    if tool.description.is_empty() {
        tool.name.clone()
    } else {
        format!("{} ({})", tool.name, tool.description)
    }
}
