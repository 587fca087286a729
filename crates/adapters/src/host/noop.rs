// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op host dispatch

use super::{HostDispatch, HostError};
use async_trait::async_trait;
use cw_core::Firing;

/// Host dispatch that silently accepts every firing
#[derive(Debug, Clone, Default)]
pub struct NoOpHostDispatch;

#[async_trait]
impl HostDispatch for NoOpHostDispatch {
    async fn fire(&self, _firing: &Firing) -> Result<(), HostError> {
        Ok(())
    }
}
