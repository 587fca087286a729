// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging host dispatch

use super::{HostDispatch, HostError};
use async_trait::async_trait;
use cw_core::Firing;

/// Host dispatch that logs each firing; the default when no real host
/// is wired up
#[derive(Debug, Clone, Default)]
pub struct LogHostDispatch;

#[async_trait]
impl HostDispatch for LogHostDispatch {
    async fn fire(&self, firing: &Firing) -> Result<(), HostError> {
        tracing::info!(
            firing_id = %firing.id,
            trigger = %firing.trigger,
            kind = %firing.kind,
            event = %firing.event.key(),
            title = %firing.event.title,
            "trigger fired"
        );
        Ok(())
    }
}
