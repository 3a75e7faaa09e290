//! Application state store shared by the workflows and the console

use parking_lot::RwLock;
use std::sync::Arc;

use crate::tabs::Tab;
use crate::types::{Document, QueryResult, SelectedFile, UploadResult};

/// Loading flag and error slot of one workflow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowStatus {
    /// A request is outstanding
    pub is_loading: bool,
    /// Error to show in the banner
    pub error: Option<String>,
}

/// Query panel state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPanel {
    /// Question being edited
    pub input: String,
    /// Last answer
    pub result: Option<QueryResult>,
    pub status: WorkflowStatus,
}

/// PDF upload panel state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPanel {
    /// Text of the file-picker input
    pub file_input: String,
    /// Currently accepted file
    pub selected: Option<SelectedFile>,
    /// Result of the last successful upload
    pub result: Option<UploadResult>,
    pub status: WorkflowStatus,
}

/// Document management panel state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagePanel {
    /// Content of the document being added
    pub content_input: String,
    /// Metadata text of the document being added
    pub metadata_input: String,
    /// Corpus as of the latest-started fetch that has landed
    pub documents: Vec<Document>,
    pub status: WorkflowStatus,
    /// Ticket of the most recently started list fetch
    pub(crate) refresh_issued: u64,
    /// Ticket of the fetch whose result `documents` holds
    pub(crate) refresh_applied: u64,
}

/// Everything the panels render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub active_tab: Tab,
    pub query: QueryPanel,
    pub upload: UploadPanel,
    pub manage: ManagePanel,
}

impl AppState {
    /// Status channel of a workflow
    pub fn status(&self, tab: Tab) -> &WorkflowStatus {
        match tab {
            Tab::Query => &self.query.status,
            Tab::Upload => &self.upload.status,
            Tab::Manage => &self.manage.status,
        }
    }

    pub(crate) fn status_mut(&mut self, tab: Tab) -> &mut WorkflowStatus {
        match tab {
            Tab::Query => &mut self.query.status,
            Tab::Upload => &mut self.upload.status,
            Tab::Manage => &mut self.manage.status,
        }
    }

    /// Error banner of the active panel
    pub fn banner(&self) -> Option<&str> {
        self.status(self.active_tab).error.as_deref()
    }

    /// Whether any workflow has a request outstanding
    pub fn any_loading(&self) -> bool {
        Tab::ALL.iter().any(|tab| self.status(*tab).is_loading)
    }

    pub fn document_count(&self) -> usize {
        self.manage.documents.len()
    }
}

/// Cloneable handle to the application state.
///
/// Reads are open to everyone; mutation is reserved to the workflows and the
/// tab controller inside this crate.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<AppState>>,
}

impl Store {
    /// Create a store with the initial state (Query tab, nothing loaded)
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AppState {
        self.inner.read().clone()
    }

    /// Read the state without copying it
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.read())
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Start an operation of `workflow`.
    ///
    /// Clears the workflow's error and raises its loading flag until the
    /// returned guard drops. Returns `None` while a previous operation of the
    /// same workflow is still outstanding.
    pub(crate) fn begin(&self, workflow: Tab) -> Option<LoadingGuard> {
        self.update(|state| {
            let status = state.status_mut(workflow);
            if status.is_loading {
                return None;
            }
            status.is_loading = true;
            status.error = None;
            Some(LoadingGuard {
                store: self.clone(),
                workflow,
            })
        })
    }

    /// Put a message in a workflow's error slot
    pub(crate) fn set_error(&self, workflow: Tab, message: impl Into<String>) {
        let message = message.into();
        self.update(|state| state.status_mut(workflow).error = Some(message));
    }

    pub(crate) fn clear_error(&self, workflow: Tab) {
        self.update(|state| state.status_mut(workflow).error = None);
    }
}

/// Keeps a workflow's loading flag raised; clears it on drop, whatever the
/// exit path
#[must_use = "dropping the guard ends the operation immediately"]
pub struct LoadingGuard {
    store: Store,
    workflow: Tab,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.store
            .update(|state| state.status_mut(self.workflow).is_loading = false);
    }
}
