use anyhow::Context;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Backend trait: run a program with arguments and capture its output
#[async_trait]
pub trait Backend: Send + Sync {
    async fn run(&self, program: &str, args: &[String], timeout_secs: Option<u64>) -> anyhow::Result<CommandOutput>;
}

/// Local backend: spawns the program directly on the host, no shell involved
#[derive(Debug, Default)]
pub struct LocalBackend;

impl LocalBackend {
    pub fn new() -> Self { Self {} }
}

#[async_trait]
impl Backend for LocalBackend {
    async fn run(&self, program: &str, args: &[String], timeout_secs: Option<u64>) -> anyhow::Result<CommandOutput> {
        let mut c = Command::new(program);
        c.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = c
            .spawn()
            .with_context(|| format!("failed to spawn {}", program))?;

        let output = match timeout_secs {
            Some(secs) => {
                // dropping the timed-out future drops the child, which kills it
                tokio::time::timeout(std::time::Duration::from_secs(secs), child.wait_with_output())
                    .await
                    .map_err(|_| anyhow::anyhow!("{} timed out after {}s", program, secs))?
            }
            None => child.wait_with_output().await,
        }
        .with_context(|| format!("waiting for {} failed", program))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            code: output.status.code(),
        })
    }
}
