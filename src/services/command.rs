use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {}{}", exit_status(.code), stderr_suffix(.stderr))]
    Failed {
        program: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

impl CommandError {
    /// True when the command ran, exited with `code` and wrote nothing.
    pub fn is_silent_exit(&self, expected_code: i32) -> bool {
        matches!(
            self,
            CommandError::Failed { code: Some(code), stdout, stderr, .. }
                if *code == expected_code && stdout.trim().is_empty() && stderr.trim().is_empty()
        )
    }
}

#[derive(Debug, Default, Clone)]
pub struct DefaultCommandRunner;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
impl CommandRunner for DefaultCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        debug!("Running: {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            return Err(CommandError::Failed {
                program: program.to_string(),
                code: output.status.code(),
                stdout,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(stdout)
    }

    async fn stream(&self, program: &str, args: &[String]) -> Result<(), CommandError> {
        debug!("Running with inherited stdio: {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(CommandError::Failed {
                program: program.to_string(),
                code: status.code(),
                stdout: String::new(),
                stderr: String::new(),
            });
        }

        Ok(())
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` to completion and returns its stdout.
    async fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError>;
    /// Runs `program` with the terminal attached and waits for it.
    async fn stream(&self, program: &str, args: &[String]) -> Result<(), CommandError>;
}
