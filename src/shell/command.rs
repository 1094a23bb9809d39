//! Subprocess execution.
//!
//! Two flavours of execution live here:
//! - [`execute`] runs a command line through the user's shell (install recipes)
//! - [`CommandRunner`] runs a program with a discrete argument vector, never
//!   through a shell (the provisioning, status, and handoff tools)

use crate::error::{ClusterUpError, Result};
use std::collections::HashMap;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// One-line description of a failed run, preferring captured stderr.
    pub fn failure_summary(&self, command: &str) -> String {
        let detail = self.stderr.lines().rev().find(|l| !l.trim().is_empty());
        match (self.exit_code, detail) {
            (Some(code), Some(line)) => {
                format!("{} exited with code {}: {}", command, code, line.trim())
            }
            (Some(code), None) => format!("{} exited with code {}", command, code),
            (None, _) => format!("{} was terminated by a signal", command),
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<std::path::PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Options that capture both streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }
}

/// Runs external programs with a discrete argument vector.
///
/// Production code uses [`SystemRunner`]; tests substitute
/// [`MockRunner`](super::MockRunner).
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to exit.
    ///
    /// A program that could not be started is reported as
    /// `ClusterUpError::CommandNotStarted` carrying the OS error.
    fn run(
        &mut self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &mut self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        let line = display_command(program, args);
        tracing::debug!("Running {}", line);
        spawn_and_wait(cmd, &line, options)
    }
}

/// Render a program and its arguments as a single display line.
///
/// Arguments containing whitespace are quoted so the line can be pasted
/// into a shell; this is for display only and is never executed.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|a| {
            if a.is_empty() || a.chars().any(char::is_whitespace) {
                format!("'{}'", a)
            } else {
                a.clone()
            }
        }))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute a command line through the user's shell.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let shell = detect_shell();

    let mut cmd = Command::new(&shell);
    cmd.arg(shell_flag());
    cmd.arg(command);

    tracing::debug!("Running `{}` via {}", command, shell);
    spawn_and_wait(cmd, command, options)
}

fn spawn_and_wait(
    mut cmd: Command,
    line: &str,
    options: &CommandOptions,
) -> Result<CommandResult> {
    let start = Instant::now();

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::inherit());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to start `{}`: {}", line, e);
        ClusterUpError::CommandNotStarted {
            command: line.to_string(),
            message: e.to_string(),
        }
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Detect the current shell.
fn detect_shell() -> String {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

/// Get the flag to pass commands to the shell.
///
/// Uses `-lc` (login, non-interactive) on Unix so package managers such as
/// Homebrew that are initialised in `.zprofile`/`.bash_profile` are on PATH
/// when install recipes run.
fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-lc"
    }
}
