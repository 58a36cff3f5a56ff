//! MCP protocol types based on JSON-RPC 2.0.
//!
//! The Model Context Protocol uses JSON-RPC 2.0 for communication.
//! This module defines the message types for request/response handling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC version constant.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version.
pub const MCP_VERSION: &str = "2024-11-05";

/// JSON-RPC request message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// JSON-RPC response message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC notification (no response expected).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Request ID - can be string, number, or null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
    Null,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// Standard JSON-RPC error codes
impl JsonRpcError {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;

    fn new(code: i32, message: String) -> Self {
        Self {
            code,
            message,
            data: None,
        }
    }

    pub fn parse_error(msg: &str) -> Self {
        Self::new(Self::PARSE_ERROR, format!("Parse error: {}", msg))
    }

    pub fn invalid_request(msg: &str) -> Self {
        Self::new(Self::INVALID_REQUEST, format!("Invalid request: {}", msg))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(Self::METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Invalid params; the message is passed through unchanged.
    pub fn invalid_params(msg: &str) -> Self {
        Self::new(Self::INVALID_PARAMS, msg.to_string())
    }

    /// Internal error; the message is passed through unchanged.
    pub fn internal_error(msg: &str) -> Self {
        Self::new(Self::INTERNAL_ERROR, msg.to_string())
    }
}

impl JsonRpcResponse {
    /// Create a successful response.
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: RequestId, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// MCP initialization request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: String,
    #[serde(default)]
    pub capabilities: Value,
    pub client_info: ClientInfo,
}

/// Client info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// MCP initialization response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

/// Server capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcesCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompts: Option<PromptsCapability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    #[serde(default)]
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesCapability {
    #[serde(default)]
    pub subscribe: bool,
    #[serde(default)]
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptsCapability {
    #[serde(default)]
    pub list_changed: bool,
}

/// Server info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

// ============================================================================
// Tools
// ============================================================================

/// Tool definition for tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Tools list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDefinition>,
}

/// Tool call request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Tool call result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Text content block, shared by tool results and prompt messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TextContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl TextContent {
    pub fn text(&self) -> &str {
        match self {
            TextContent::Text { text } => text,
        }
    }
}

impl ToolCallResult {
    /// Create a successful text result.
    pub fn text(content: String) -> Self {
        Self {
            content: vec![TextContent::Text { text: content }],
            is_error: None,
        }
    }

    /// Create an error result.
    pub fn error(message: String) -> Self {
        Self {
            content: vec![TextContent::Text { text: message }],
            is_error: Some(true),
        }
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Resource definition for resources/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    pub uri: String,
    pub mime_type: String,
    pub name: String,
    pub description: String,
}

/// Resources list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesListResult {
    pub resources: Vec<ResourceDefinition>,
}

/// resources/read request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceParams {
    pub uri: String,
}

/// One text body returned by resources/read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

/// resources/read response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceResult {
    pub contents: Vec<ResourceContents>,
}

// ============================================================================
// Prompts
// ============================================================================

/// Prompt definition for prompts/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

/// Argument accepted by a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Prompts list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsListResult {
    pub prompts: Vec<PromptDefinition>,
}

/// prompts/get request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// One message of a rendered prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: TextContent,
}

/// prompts/get response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptResult {
    pub description: String,
    pub messages: Vec<PromptMessage>,
}

impl GetPromptResult {
    /// A prompt made of a single user message.
    pub fn user(description: &str, text: String) -> Self {
        Self {
            description: description.to_string(),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: TextContent::Text { text },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let req = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: RequestId::Number(1),
            method: "initialize".to_string(),
            params: Some(json!({"test": true})),
        };

        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":1"));
    }

    #[test]
    fn test_notification_does_not_parse_as_request() {
        let line = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(serde_json::from_str::<JsonRpcRequest>(line).is_err());
        assert!(serde_json::from_str::<JsonRpcNotification>(line).is_ok());
    }

    #[test]
    fn test_response_error_skips_result() {
        let resp =
            JsonRpcResponse::error(RequestId::Number(1), JsonRpcError::method_not_found("test"));

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("result").is_none());
        assert_eq!(json["error"]["code"], JsonRpcError::METHOD_NOT_FOUND);
        assert_eq!(json["error"]["message"], "Method not found: test");
    }

    #[test]
    fn test_pass_through_messages() {
        let err = JsonRpcError::invalid_params("Unknown tool: nope");
        assert_eq!(err.code, JsonRpcError::INVALID_PARAMS);
        assert_eq!(err.message, "Unknown tool: nope");

        let err = JsonRpcError::internal_error("fetch failed: boom");
        assert_eq!(err.code, JsonRpcError::INTERNAL_ERROR);
        assert_eq!(err.message, "fetch failed: boom");
    }

    #[test]
    fn test_tool_call_result_wire_format() {
        let ok = serde_json::to_value(ToolCallResult::text("Hello".to_string())).unwrap();
        assert_eq!(ok, json!({"content": [{"type": "text", "text": "Hello"}]}));

        let err = serde_json::to_value(ToolCallResult::error("Nope".to_string())).unwrap();
        assert_eq!(
            err,
            json!({"content": [{"type": "text", "text": "Nope"}], "isError": true})
        );
    }

    #[test]
    fn test_capabilities_are_camel_case() {
        let caps = ServerCapabilities {
            tools: Some(ToolsCapability {
                list_changed: false,
            }),
            resources: Some(ResourcesCapability {
                subscribe: false,
                list_changed: false,
            }),
            prompts: None,
        };
        let json = serde_json::to_value(caps).unwrap();
        assert_eq!(json["tools"], json!({"listChanged": false}));
        assert!(json.get("prompts").is_none());
    }

    #[test]
    fn test_resource_contents_wire_format() {
        let result = ReadResourceResult {
            contents: vec![ResourceContents {
                uri: "standup://current".to_string(),
                mime_type: "text/markdown".to_string(),
                text: "# hi".to_string(),
            }],
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["contents"][0]["mimeType"], "text/markdown");
    }

    #[test]
    fn test_prompt_result_wire_format() {
        let result = GetPromptResult::user("desc", "body".to_string());
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({
                "description": "desc",
                "messages": [{"role": "user", "content": {"type": "text", "text": "body"}}]
            })
        );
    }

    #[test]
    fn test_request_id_variants() {
        assert_eq!(serde_json::to_string(&RequestId::Number(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&RequestId::String("abc".to_string())).unwrap(),
            "\"abc\""
        );
        assert_eq!(serde_json::to_string(&RequestId::Null).unwrap(), "null");
    }
}
