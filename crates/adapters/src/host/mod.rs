// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host trigger-fire adapters
//!
//! The host performs the actual automation actions; the engine only
//! reports satisfied triggers through this interface.

mod log;
mod noop;

pub use log::LogHostDispatch;
pub use noop::NoOpHostDispatch;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeHostDispatch;

use async_trait::async_trait;
use cw_core::Firing;
use thiserror::Error;

/// Errors from host dispatch
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host rejected firing: {0}")]
    Rejected(String),
    #[error("host unreachable: {0}")]
    Unreachable(String),
}

/// Adapter for the host's trigger-fire interface
#[async_trait]
pub trait HostDispatch: Clone + Send + Sync + 'static {
    /// Deliver one firing to the host, exactly once per call
    async fn fire(&self, firing: &Firing) -> Result<(), HostError>;
}
