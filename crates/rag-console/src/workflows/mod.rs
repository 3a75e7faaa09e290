//! User-facing workflows: query, PDF ingestion, document management
//!
//! Each workflow reads its inputs from the store, calls the gateway, and
//! writes the settled outcome back into its own panel. Failures never escape
//! a workflow; they end up in the workflow's error slot.

pub mod documents;
pub mod query;
pub mod upload;

use std::sync::Arc;

use crate::gateway::BackendGateway;
use crate::store::Store;

pub use documents::{AutoConfirm, Confirm, ConfirmedDelete};

/// How a workflow invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The operation completed and state was updated
    Succeeded,
    /// The operation failed; the error slot says why
    Failed,
    /// Nothing happened (empty input, declined confirmation, or a request
    /// of the same workflow still outstanding)
    Skipped,
}

impl Settled {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Entry point for every workflow operation
#[derive(Clone)]
pub struct Workflows {
    store: Store,
    gateway: Arc<dyn BackendGateway>,
}

impl Workflows {
    pub fn new(store: Store, gateway: Arc<dyn BackendGateway>) -> Self {
        Self { store, gateway }
    }

    /// Store the workflows write into
    pub fn store(&self) -> &Store {
        &self.store
    }
}
