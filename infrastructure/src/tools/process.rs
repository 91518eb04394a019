//! External process execution shared by the build and WP-CLI tools

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use wpmcp_domain::core::string::truncate_head;
use wpmcp_domain::tool::ToolError;

/// Maximum output kept per stream (1 MB)
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

/// Shell used for wrapped WP-CLI commands. The Local by Flywheel wrapper
/// relies on `source` and `&>`, so plain `sh` is not enough.
const SHELL: &str = "bash";

/// Captured output of a finished process
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, `-1` when killed by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout followed by stderr
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !combined.is_empty() {
                combined.push_str("\n--- stderr ---\n");
            }
            combined.push_str(&self.stderr);
        }
        combined
    }
}

/// Runs programs with a timeout, in a given working directory
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `program` with `args` in `cwd`.
    ///
    /// A non-zero exit is not an error here; callers decide what it means.
    pub async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput, ToolError> {
        let executable = locate(program)?;
        let mut command = Command::new(&executable);
        command.args(args);
        self.execute(command, program, cwd).await
    }

    /// Run a command line through `bash -c` in `cwd`
    pub async fn run_shell(&self, command_line: &str, cwd: &Path) -> Result<CommandOutput, ToolError> {
        let shell = locate(SHELL)?;
        let mut command = Command::new(&shell);
        command.arg("-c").arg(command_line);
        self.execute(command, command_line, cwd).await
    }

    async fn execute(
        &self,
        mut command: Command,
        command_line: &str,
        cwd: &Path,
    ) -> Result<CommandOutput, ToolError> {
        if !cwd.is_dir() {
            return Err(ToolError::not_found(format!(
                "Working directory does not exist: {}",
                cwd.display()
            )));
        }

        command
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(command = command_line, cwd = %cwd.display(), "Spawning process");
        let start = Instant::now();
        let child = command.spawn().map_err(|e| {
            ToolError::execution_failed(format!("Failed to spawn `{}`: {}", command_line, e))
        })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ToolError::execution_failed(format!(
                    "Failed to wait for `{}`: {}",
                    command_line, e
                )));
            }
            Err(_) => {
                tracing::warn!(command = command_line, "Process timed out");
                return Err(ToolError::timeout(format!(
                    "`{}` did not finish within {} seconds",
                    command_line,
                    self.timeout.as_secs()
                )));
            }
        };

        let result = CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: truncate_head(&String::from_utf8_lossy(&output.stdout), MAX_OUTPUT_SIZE),
            stderr: truncate_head(&String::from_utf8_lossy(&output.stderr), MAX_OUTPUT_SIZE),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        tracing::debug!(
            command = command_line,
            exit_code = result.exit_code,
            duration_ms = result.duration_ms,
            "Process finished"
        );
        Ok(result)
    }
}

/// Resolve a program name against `PATH`; absolute and relative paths are
/// checked as given.
fn locate(program: &str) -> Result<PathBuf, ToolError> {
    which::which(program).map_err(|_| {
        ToolError::not_found(format!("executable `{}` (is it installed and on PATH?)", program))
    })
}
