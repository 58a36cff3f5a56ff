//! MCP server implementation.
//!
//! The server handles the MCP protocol lifecycle:
//! 1. Initialize - exchange capabilities
//! 2. Serve tools/resources/prompts - each request generates a fresh report
//! 3. Shutdown - when the client closes stdin

use serde::Serialize;
use serde_json::Value;

use crate::handlers::StandupHandler;
use crate::protocol::{
    GetPromptParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, PromptsCapability, PromptsListResult, ReadResourceParams, RequestId,
    ResourcesCapability, ResourcesListResult, ServerCapabilities, ServerInfo, ToolCallParams,
    ToolsCapability, ToolsListResult, MCP_VERSION,
};
use crate::transport::{IncomingMessage, StdioTransport};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "standup-mcp";

/// MCP server for standup reports.
pub struct McpServer {
    handler: StandupHandler,
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(handler: StandupHandler) -> Self {
        Self {
            handler,
            initialized: false,
        }
    }

    /// Run the MCP server on stdin/stdout.
    pub async fn run(&mut self) -> standup_core::Result<()> {
        let mut transport = StdioTransport::stdio();
        self.serve(&mut transport).await
    }

    /// Serve requests from `transport` until end of input.
    pub async fn serve(&mut self, transport: &mut StdioTransport) -> standup_core::Result<()> {
        tracing::info!("Starting MCP server");

        loop {
            match transport.read_message() {
                Ok(Some(msg)) => {
                    if let Some(resp) = self.handle_message(msg).await {
                        transport.write_response(&resp)?;
                    }
                }
                Ok(None) => {
                    tracing::info!("EOF received, shutting down");
                    break;
                }
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    tracing::warn!("Transport error: {}", e);
                    let error_resp = JsonRpcResponse::error(
                        RequestId::Null,
                        JsonRpcError::parse_error(&e.to_string()),
                    );
                    transport.write_response(&error_resp)?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!("MCP server stopped");
        Ok(())
    }

    /// Handle an incoming message.
    async fn handle_message(&mut self, msg: IncomingMessage) -> Option<JsonRpcResponse> {
        match msg {
            IncomingMessage::Request(req) => Some(self.handle_request(req).await),
            IncomingMessage::Notification(notif) => {
                self.handle_notification(&notif.method);
                None
            }
        }
    }

    /// Handle a JSON-RPC request.
    async fn handle_request(&mut self, req: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!("Handling request: {} (id: {:?})", req.method, req.id);

        let id = req.id;
        let outcome = match req.method.as_str() {
            "initialize" => self.handle_initialize(req.params),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => to_value(ToolsListResult {
                tools: self.handler.available_tools(),
            }),
            "tools/call" => self.handle_tools_call(req.params).await,
            "resources/list" => to_value(ResourcesListResult {
                resources: self.handler.available_resources(),
            }),
            "resources/read" => self.handle_resources_read(req.params).await,
            "prompts/list" => to_value(PromptsListResult {
                prompts: self.handler.available_prompts(),
            }),
            "prompts/get" => self.handle_prompts_get(req.params).await,
            method => {
                tracing::warn!("Unknown method: {}", method);
                Err(JsonRpcError::method_not_found(method))
            }
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        }
    }

    /// Handle notifications (no response).
    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                tracing::info!("Client initialized");
            }
            "notifications/cancelled" => {
                tracing::debug!("Request cancelled by client");
            }
            _ => {
                tracing::debug!("Ignoring notification: {}", method);
            }
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&mut self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        if self.initialized {
            return Err(JsonRpcError::invalid_request("Server already initialized"));
        }

        if let Some(params) = params {
            match serde_json::from_value::<InitializeParams>(params) {
                Ok(init_params) => {
                    tracing::info!(
                        "Client: {} v{} (protocol: {})",
                        init_params.client_info.name,
                        init_params.client_info.version,
                        init_params.protocol_version
                    );
                }
                Err(e) => {
                    tracing::warn!("Failed to parse initialize params: {}", e);
                }
            }
        }

        self.initialized = true;

        to_value(InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
                prompts: Some(PromptsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: ToolCallParams = parse_params(params)?;
        tracing::info!("Calling tool: {}", params.name);

        let result = self.handler.call_tool(&params.name, params.arguments).await?;
        to_value(result)
    }

    async fn handle_resources_read(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: ReadResourceParams = parse_params(params)?;
        tracing::info!("Reading resource: {}", params.uri);

        let result = self.handler.read_resource(&params.uri).await?;
        to_value(result)
    }

    async fn handle_prompts_get(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: GetPromptParams = parse_params(params)?;
        tracing::info!("Getting prompt: {}", params.name);

        let result = self
            .handler
            .get_prompt(&params.name, params.arguments)
            .await?;
        to_value(result)
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
    serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(&e.to_string()))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(&e.to_string()))
}
