//! Tool, resource and prompt handlers for the MCP server.
//!
//! All three surfaces are thin adapters over [`ReportPipeline::generate`].
//! They differ only in how arguments are read and how failures are reported:
//! the tool returns an error-flagged result, the resource and prompts return a
//! JSON-RPC error.

use serde_json::{json, Value};
use standup_core::locale::PromptText;
use standup_core::Messages;
use standup_pipeline::ReportPipeline;

use crate::arguments::{
    repo_path, window_hours, DEFAULT_REPO_PATH, DEFAULT_WINDOW_HOURS, DEFAULT_WORK_HOURS,
};
use crate::protocol::{
    GetPromptResult, JsonRpcError, PromptArgument, PromptDefinition, ReadResourceResult,
    ResourceContents, ResourceDefinition, ToolCallResult, ToolDefinition,
};

/// The single tool.
pub const COLLECT_TOOL: &str = "collect_standup_info";

/// Report for the server's working directory.
pub const CURRENT_RESOURCE_URI: &str = "standup://current";

pub const MORNING_PROMPT: &str = "morning-standup";
pub const EVENING_PROMPT: &str = "evening-standup";

const MARKDOWN_MIME: &str = "text/markdown";

/// Executes tools, reads resources and renders prompts.
#[derive(Clone)]
pub struct StandupHandler {
    pipeline: ReportPipeline,
}

impl StandupHandler {
    pub fn new(pipeline: ReportPipeline) -> Self {
        Self { pipeline }
    }

    fn messages(&self) -> &'static Messages {
        self.pipeline.messages()
    }

    // ========================================================================
    // Tools
    // ========================================================================

    /// Definitions for tools/list.
    pub fn available_tools(&self) -> Vec<ToolDefinition> {
        let m = self.messages();
        vec![ToolDefinition {
            name: COLLECT_TOOL.to_string(),
            description: m.tool_description.to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "repo_path": {
                        "type": "string",
                        "description": m.repo_path_description
                    },
                    "since_hours": {
                        "type": "number",
                        "description": m.since_hours_description,
                        "default": DEFAULT_WINDOW_HOURS
                    }
                },
                "required": ["repo_path"]
            }),
        }]
    }

    /// Execute a tool by name.
    ///
    /// Only an unknown tool name is a protocol error; every other failure is
    /// reported inside the result with `isError` set.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<ToolCallResult, JsonRpcError> {
        if name != COLLECT_TOOL {
            return Err(JsonRpcError::invalid_params(&format!("Unknown tool: {}", name)));
        }

        let result = async {
            let path = repo_path(arguments.as_ref())?;
            let hours = window_hours(arguments.as_ref(), "since_hours", DEFAULT_WINDOW_HOURS)?;
            self.pipeline.generate(&path, hours).await
        }
        .await;

        Ok(match result {
            Ok(markdown) => ToolCallResult::text(markdown),
            Err(e) => {
                log_failure(&e);
                ToolCallResult::error(format!("{}: {}", self.messages().tool_error_prefix, e))
            }
        })
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Definitions for resources/list.
    pub fn available_resources(&self) -> Vec<ResourceDefinition> {
        let m = self.messages();
        vec![ResourceDefinition {
            uri: CURRENT_RESOURCE_URI.to_string(),
            mime_type: MARKDOWN_MIME.to_string(),
            name: m.resource_name.to_string(),
            description: m.resource_description.to_string(),
        }]
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, JsonRpcError> {
        if uri != CURRENT_RESOURCE_URI {
            return Err(JsonRpcError::invalid_params(&format!("Unknown resource: {}", uri)));
        }

        let markdown = self
            .pipeline
            .generate(DEFAULT_REPO_PATH, DEFAULT_WINDOW_HOURS)
            .await
            .map_err(|e| self.fetch_error(e))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents {
                uri: uri.to_string(),
                mime_type: MARKDOWN_MIME.to_string(),
                text: markdown,
            }],
        })
    }

    // ========================================================================
    // Prompts
    // ========================================================================

    /// Definitions for prompts/list.
    pub fn available_prompts(&self) -> Vec<PromptDefinition> {
        let m = self.messages();
        let repo_path = || PromptArgument {
            name: "repo_path".to_string(),
            description: m.repo_path_description.to_string(),
            required: true,
        };

        vec![
            PromptDefinition {
                name: MORNING_PROMPT.to_string(),
                description: m.morning.description.to_string(),
                arguments: vec![repo_path()],
            },
            PromptDefinition {
                name: EVENING_PROMPT.to_string(),
                description: m.evening.description.to_string(),
                arguments: vec![
                    repo_path(),
                    PromptArgument {
                        name: "work_hours".to_string(),
                        description: m.work_hours_description.to_string(),
                        required: false,
                    },
                ],
            },
        ]
    }

    /// Render a prompt by name.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<GetPromptResult, JsonRpcError> {
        let m = self.messages();
        let (text, hours) = match name {
            MORNING_PROMPT => (&m.morning, Ok(DEFAULT_WINDOW_HOURS)),
            EVENING_PROMPT => (
                &m.evening,
                window_hours(arguments.as_ref(), "work_hours", DEFAULT_WORK_HOURS),
            ),
            _ => {
                return Err(JsonRpcError::invalid_params(&format!(
                    "Unknown prompt: {}",
                    name
                )))
            }
        };

        let result = async {
            let path = repo_path(arguments.as_ref())?;
            self.pipeline.generate(&path, hours?).await
        }
        .await;

        let markdown = result.map_err(|e| self.fetch_error(e))?;
        Ok(GetPromptResult::user(
            text.result_description,
            conversation(text, &markdown),
        ))
    }

    fn fetch_error(&self, e: standup_core::Error) -> JsonRpcError {
        log_failure(&e);
        JsonRpcError::internal_error(&format!("{}: {}", self.messages().fetch_error_prefix, e))
    }
}

fn log_failure(e: &standup_core::Error) {
    if e.is_request_fatal() {
        tracing::info!(error = %e, "Request rejected");
    } else {
        tracing::warn!(error = %e, "Report generation failed");
    }
}

/// Wrap a report in the conversation opener of a prompt.
fn conversation(text: &PromptText, markdown: &str) -> String {
    let steps: Vec<String> = text
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect();

    format!(
        "{}\n\n{}\n\n{}\n\n{}\n{}\n\n{}",
        text.greeting,
        text.context,
        markdown,
        text.steps_intro,
        steps.join("\n"),
        text.closing
    )
}
