// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op script runner

use super::{ScriptContext, ScriptError, ScriptOutcome, ScriptRunner};
use async_trait::async_trait;

/// Script runner that accepts every script without running it
#[derive(Debug, Clone, Default)]
pub struct NoOpScriptRunner;

#[async_trait]
impl ScriptRunner for NoOpScriptRunner {
    async fn run(&self, _script: &str, _ctx: &ScriptContext) -> Result<ScriptOutcome, ScriptError> {
        Ok(ScriptOutcome {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}
