//! Common test utilities for driving the MCP server end to end.
//!
//! - `StubPort`: canned repository output, with `gh` optionally missing
//! - `SharedBuffer`: captures what the server writes
//! - `run_session`: feeds JSON-RPC lines through a real server loop

use std::io::{self, Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use standup_core::{Collector, Error, Locale, RepositoryQueryPort, Result};
use standup_mcp::{McpServer, StandupHandler, StdioTransport};
use standup_pipeline::ReportPipeline;
use tempfile::TempDir;

/// Port returning fixed output for a repository with one commit.
#[derive(Debug, Default)]
pub struct StubPort {
    /// Simulate a machine without the GitHub CLI
    pub gh_missing: bool,
}

impl StubPort {
    fn gh(&self, output: &str) -> Result<String> {
        if self.gh_missing {
            Err(Error::CommandFailed {
                program: "gh".to_string(),
                code: 127,
                stderr: "gh: command not found".to_string(),
            })
        } else {
            Ok(output.to_string())
        }
    }
}

#[async_trait]
impl RepositoryQueryPort for StubPort {
    async fn toplevel(&self, _repo: &Path) -> Result<String> {
        Ok("/work/standup-tools".to_string())
    }
    async fn current_branch(&self, _repo: &Path) -> Result<String> {
        Ok("main".to_string())
    }
    async fn remote_url(&self, _repo: &Path) -> Result<String> {
        self.gh("https://github.com/meteora-pro/standup-tools")
    }
    async fn commit_summary(&self, _repo: &Path, _since: &str) -> Result<String> {
        Ok("abc1234 Add MCP server".to_string())
    }
    async fn commit_detail(&self, _repo: &Path, _since: &str) -> Result<String> {
        Ok("commit abc1234 - Add MCP server (3 hours ago)\n\n src/server.rs | 120 ++++".to_string())
    }
    async fn working_tree_diff_stat(&self, _repo: &Path) -> Result<String> {
        Ok(" src/main.rs | 2 +-".to_string())
    }
    async fn working_tree_diff(&self, _repo: &Path) -> Result<String> {
        Ok("diff --git a/src/main.rs b/src/main.rs\n-old\n+new".to_string())
    }
    async fn staged_diff_stat(&self, _repo: &Path) -> Result<String> {
        Ok(String::new())
    }
    async fn open_pull_requests(&self, _repo: &Path) -> Result<String> {
        self.gh("- #7 Add MCP server (updated: 2026-10-16T08:00:00Z)\n  https://github.com/meteora-pro/standup-tools/pull/7")
    }
    async fn merged_pull_requests(&self, _repo: &Path, _limit: u32) -> Result<String> {
        self.gh("")
    }
    async fn review_requested_pull_requests(&self, _repo: &Path) -> Result<String> {
        self.gh("")
    }
}

/// Writer whose contents stay readable after the transport takes it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A directory that passes repository validation.
pub fn git_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();
    dir
}

/// Run one server session over `lines` and return every response written.
pub async fn run_session(port: StubPort, locale: Locale, lines: &[Value]) -> Vec<Value> {
    let input: String = lines.iter().map(|line| format!("{}\n", line)).collect();
    let output = SharedBuffer::default();
    let mut transport =
        StdioTransport::new(Box::new(Cursor::new(input)), Box::new(output.clone()));

    let pipeline = ReportPipeline::new(Collector::new(Arc::new(port)), locale.messages());
    let mut server = McpServer::new(StandupHandler::new(pipeline));
    server.serve(&mut transport).await.unwrap();

    output
        .contents()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
