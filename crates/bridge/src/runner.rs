use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::envelope::ProcessOutcome;
use crate::invocation::Invocation;

/// Starts evaluator processes. The seam exists so tests can count or fake spawns.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessOutcome>;
}

/// Spawns one child per call and waits for it to exit. No timeout, no retry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessOutcome> {
        let output = Command::new(invocation.program())
            .args(invocation.args())
            .current_dir(invocation.working_directory())
            .env_clear()
            .envs(invocation.env())
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(ProcessOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}
