//! Turning interpreter output into tool results.

pub mod markdown;
pub mod outcome;
pub mod parser;

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::Value;
use wlst_types::ResponseFormat;

use crate::types::WlstError;
pub use markdown::RenderMarkdown;
pub use outcome::interpret;

/// A rendered tool result.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Markdown(String),
    Json(Value),
}

impl ToolOutput {
    /// Markdown becomes text content; JSON becomes structured content.
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            ToolOutput::Markdown(text) => CallToolResult::success(vec![Content::text(text)]),
            ToolOutput::Json(value) => CallToolResult::structured(value),
        }
    }
}

/// Render `value` in the requested format. Pure: the same value always
/// renders to the same output.
pub fn render<T>(value: &T, format: ResponseFormat) -> Result<ToolOutput, WlstError>
where
    T: Serialize + RenderMarkdown,
{
    match format {
        ResponseFormat::Markdown => Ok(ToolOutput::Markdown(value.to_markdown())),
        ResponseFormat::Json => serde_json::to_value(value)
            .map(ToolOutput::Json)
            .map_err(|error| WlstError::unexpected_output("render", error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wlst_types::{JvmMetrics, MetricSection, ServerListing, ServerMetrics, ServerStatus};

    fn listing() -> ServerListing {
        ServerListing::new(vec![ServerStatus {
            name: "AdminServer".to_string(),
            state: Some("RUNNING".to_string()),
        }])
    }

    #[test]
    fn json_rendering_uses_camel_case_shape() {
        let ToolOutput::Json(value) = render(&listing(), ResponseFormat::Json).unwrap() else {
            panic!("expected json output");
        };
        assert_eq!(value, serde_json::json!({ "servers": [{ "name": "AdminServer", "state": "RUNNING" }], "total": 1 }));
    }

    #[test]
    fn rendering_is_idempotent_through_json() {
        let metrics = ServerMetrics {
            server: "ms1".to_string(),
            jvm: Some(MetricSection::Collected(JvmMetrics {
                heap_size_current: 10,
                heap_size_max: 20,
                heap_free_current: 5,
                heap_free_percent: 50,
                uptime: 1000,
            })),
            threads: None,
            jdbc: Some(MetricSection::Failed { error: "boom".to_string() }),
            jms: None,
        };
        for format in [ResponseFormat::Markdown, ResponseFormat::Json] {
            let first = render(&metrics, format).unwrap();
            let ToolOutput::Json(value) = render(&metrics, ResponseFormat::Json).unwrap() else {
                panic!("expected json output");
            };
            let reparsed: ServerMetrics = serde_json::from_value(value).unwrap();
            assert_eq!(render(&reparsed, format).unwrap(), first);
        }
    }

    #[test]
    fn markdown_becomes_text_content() {
        let result = render(&listing(), ResponseFormat::Markdown).unwrap().into_call_result();
        assert_eq!(result.is_error, Some(false));
        assert!(result.structured_content.is_none());
    }
}
