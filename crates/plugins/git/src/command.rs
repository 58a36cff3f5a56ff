//! Bounded execution of one external program.

use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use standup_core::{Error, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Runs a single program with a timeout and no terminal.
///
/// Children are spawned with `kill_on_drop`, so dropping the returned future
/// (a cancelled request, a timeout) also terminates the process.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    timeout: Duration,
}

impl CommandRunner {
    /// Create a runner for `program`.
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// The program this runner spawns.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run with `args` inside `cwd`, returning stdout on success.
    pub async fn run(&self, args: &[&str], cwd: &Path) -> Result<String> {
        tracing::debug!("Running {} {:?} in {}", self.program, args, cwd.display());

        let output = self.command(args, cwd).output();

        let output = match tokio::time::timeout(self.timeout, output).await {
            Ok(result) => result?,
            Err(_) => return Err(self.timed_out()),
        };

        if !output.status.success() {
            return Err(self.failed(output.status, &output.stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Like [`run`](Self::run), but read at most `max_lines` lines of stdout.
    ///
    /// Once the limit is reached the child is dropped (and killed) without
    /// reading the rest of its output or waiting for its exit status.
    pub async fn run_head(&self, args: &[&str], cwd: &Path, max_lines: usize) -> Result<String> {
        tracing::debug!(
            "Running {} {:?} in {} (first {} lines)",
            self.program,
            args,
            cwd.display(),
            max_lines
        );

        let mut child = self.command(args, cwd).spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not captured"))?;

        let head = async move {
            let mut reader = BufReader::new(stdout);
            let mut head = Vec::new();
            let mut lines = 0;
            while lines < max_lines {
                if reader.read_until(b'\n', &mut head).await? == 0 {
                    break;
                }
                lines += 1;
            }

            if lines < max_lines {
                // Output ended before the limit, so the exit status counts
                let output = child.wait_with_output().await?;
                if !output.status.success() {
                    return Err(self.failed(output.status, &output.stderr));
                }
            }
            Ok::<_, Error>(head)
        };

        let head = match tokio::time::timeout(self.timeout, head).await {
            Ok(result) => result?,
            Err(_) => return Err(self.timed_out()),
        };

        Ok(String::from_utf8_lossy(&head).trim().to_string())
    }

    fn command(&self, args: &[&str], cwd: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .current_dir(cwd)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GH_PROMPT_DISABLED", "1")
            .env("NO_COLOR", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    fn timed_out(&self) -> Error {
        Error::CommandTimeout {
            program: self.program.clone(),
            seconds: self.timeout.as_secs(),
        }
    }

    fn failed(&self, status: ExitStatus, stderr: &[u8]) -> Error {
        Error::CommandFailed {
            program: self.program.clone(),
            code: status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(program: &str) -> CommandRunner {
        CommandRunner::new(program, Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_success_returns_trimmed_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = runner("git").run(&["--version"], dir.path()).await.unwrap();
        assert!(out.starts_with("git version"));
        assert!(!out.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_command_failed() {
        let dir = tempfile::tempdir().unwrap();
        // Not a repository, so rev-parse fails
        let err = runner("git")
            .run(&["rev-parse", "--show-toplevel"], dir.path())
            .await
            .unwrap_err();

        match err {
            Error::CommandFailed { program, code, .. } => {
                assert_eq!(program, "git");
                assert_ne!(code, 0);
            }
            other => panic!("Expected CommandFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = runner("standup-no-such-program")
            .run(&["--version"], dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills() {
        let dir = tempfile::tempdir().unwrap();
        let slow = CommandRunner::new("sleep", Duration::from_millis(200));

        let err = slow.run(&["30"], dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::CommandTimeout { .. }));
        assert!(err.to_string().contains("sleep timed out"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdin_is_closed() {
        let dir = tempfile::tempdir().unwrap();
        // `cat` would block on an inherited terminal until the timeout
        let cat = CommandRunner::new("cat", Duration::from_secs(5));

        let started = std::time::Instant::now();
        let out = cat.run(&[], dir.path()).await.unwrap();
        assert_eq!(out, "");
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_prompts_disabled_in_child_env() {
        let dir = tempfile::tempdir().unwrap();
        let out = runner("env").run(&[], dir.path()).await.unwrap();
        let vars: Vec<&str> = out.lines().collect();
        assert!(vars.contains(&"GIT_TERMINAL_PROMPT=0"));
        assert!(vars.contains(&"GH_PROMPT_DISABLED=1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_head_stops_endless_output() {
        let dir = tempfile::tempdir().unwrap();
        // `yes` never exits; only reading a bounded head can finish
        let yes = CommandRunner::new("yes", Duration::from_secs(10));

        let out = yes.run_head(&["diff line"], dir.path(), 200).await.unwrap();
        assert_eq!(out.lines().count(), 200);
        assert!(out.lines().all(|line| line == "diff line"));
        assert_eq!(out.len(), 200 * "diff line\n".len() - 1);
    }

    #[tokio::test]
    async fn test_run_head_short_output_checks_status() {
        let dir = tempfile::tempdir().unwrap();
        let out = runner("git")
            .run_head(&["--version"], dir.path(), 200)
            .await
            .unwrap();
        assert!(out.starts_with("git version"));

        let err = runner("git")
            .run_head(&["rev-parse", "--show-toplevel"], dir.path(), 200)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_head_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let slow = CommandRunner::new("sleep", Duration::from_millis(200));

        let err = slow.run_head(&["30"], dir.path(), 200).await.unwrap_err();
        assert!(matches!(err, Error::CommandTimeout { .. }));
    }
}
