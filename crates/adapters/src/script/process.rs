// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script runner backed by a real shell process

use super::{ScriptContext, ScriptError, ScriptOutcome, ScriptRunner};
use async_trait::async_trait;

/// Runs scripts via `sh -c` with the firing bound into the environment
#[derive(Debug, Clone, Default)]
pub struct ProcessScriptRunner;

impl ProcessScriptRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScriptRunner for ProcessScriptRunner {
    async fn run(&self, script: &str, ctx: &ScriptContext) -> Result<ScriptOutcome, ScriptError> {
        let output = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(script)
            .envs(ctx.env_vars())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ScriptError::Spawn(e.to_string()))?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !stdout.is_empty() {
            tracing::info!(
                trigger = %ctx.trigger,
                kind = %ctx.kind,
                stdout = %stdout,
                "script stdout"
            );
        }
        if !stderr.is_empty() {
            tracing::warn!(
                trigger = %ctx.trigger,
                kind = %ctx.kind,
                stderr = %stderr,
                "script stderr"
            );
        }

        Ok(ScriptOutcome {
            exit_code,
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
