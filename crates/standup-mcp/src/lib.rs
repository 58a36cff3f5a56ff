//! MCP (Model Context Protocol) server for standup-tools.
//!
//! Exposes one tool, one resource and two prompts to AI assistants over
//! newline-delimited JSON-RPC on stdio. Every surface renders a fresh report
//! through [`standup_pipeline::ReportPipeline`].

pub mod arguments;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod transport;

pub use handlers::StandupHandler;
pub use server::McpServer;
pub use transport::StdioTransport;
