//! Document management workflow: list, add, delete

use async_trait::async_trait;

use super::{Settled, Workflows};
use crate::error::{ErrorField, ValidationError};
use crate::tabs::Tab;
use crate::types::{DocumentId, Metadata, NewDocument};

/// Banner text when adding fails without a `detail` field
pub const ADD_FALLBACK: &str = "Failed to add document.";

/// Banner text when deleting fails without a `detail` field
pub const DELETE_FALLBACK: &str = "Failed to delete document.";

/// Question asked before a document is deleted
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this document?";

/// Asks the user to confirm a destructive action
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, prompt: &str) -> bool;
}

/// Answers every confirmation with a fixed value (`--yes` style flags)
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Proof that the user confirmed deleting a document.
///
/// Only [`Workflows::confirm_delete`] creates one, so the delete request
/// cannot be issued without going through the confirmation.
#[derive(Debug)]
pub struct ConfirmedDelete {
    id: DocumentId,
}

impl ConfirmedDelete {
    pub fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Workflows {
    /// Replace the content of the document being added
    pub fn set_document_content(&self, text: impl Into<String>) {
        let text = text.into();
        self.store.update(|state| state.manage.content_input = text);
    }

    /// Replace the metadata text of the document being added
    pub fn set_document_metadata(&self, text: impl Into<String>) {
        let text = text.into();
        self.store.update(|state| state.manage.metadata_input = text);
    }

    /// Re-fetch the whole corpus and replace the local copy.
    ///
    /// This is a background refresh: failures are logged and leave both the
    /// list and the error banner untouched. A fetch that settles after a
    /// later-started one has already landed is discarded.
    pub async fn refresh_documents(&self) -> Settled {
        let ticket = self.store.update(|state| {
            state.manage.refresh_issued += 1;
            state.manage.refresh_issued
        });

        match self.gateway.list_documents().await {
            Ok(documents) => {
                let count = documents.len();
                let applied = self.store.update(|state| {
                    if ticket <= state.manage.refresh_applied {
                        return false;
                    }
                    state.manage.documents = documents;
                    state.manage.refresh_applied = ticket;
                    true
                });
                if applied {
                    tracing::info!("Loaded {} documents", count);
                } else {
                    tracing::debug!("Discarding stale document list (fetch #{})", ticket);
                }
                Settled::Succeeded
            }
            Err(err) => {
                tracing::warn!("Error fetching documents: {}", err);
                Settled::Failed
            }
        }
    }

    /// Submit the document being edited, then refresh the list
    pub async fn add_document(&self) -> Settled {
        let (content, metadata_text) = self.store.read(|state| {
            (
                state.manage.content_input.clone(),
                state.manage.metadata_input.clone(),
            )
        });
        if content.trim().is_empty() {
            return Settled::Skipped;
        }

        let Some(loading) = self.store.begin(Tab::Manage) else {
            tracing::debug!("Document operation in flight, ignoring add");
            return Settled::Skipped;
        };

        let metadata = match Metadata::parse(&metadata_text) {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!("Rejected metadata: {}", err);
                self.store
                    .set_error(Tab::Manage, ValidationError::from(err).to_string());
                return Settled::Failed;
            }
        };

        let document = NewDocument { content, metadata };
        tracing::info!(
            "Adding document ({} chars, {} metadata keys)",
            document.content.len(),
            document.metadata.len()
        );

        match self.gateway.add_document(&document).await {
            Ok(()) => {
                self.store.update(|state| {
                    state.manage.content_input.clear();
                    state.manage.metadata_input.clear();
                });
                self.store.clear_error(Tab::Manage);
                drop(loading);
                self.refresh_documents().await;
                Settled::Succeeded
            }
            Err(err) => {
                tracing::warn!("Add document failed: {}", err);
                self.store.set_error(
                    Tab::Manage,
                    err.user_message(ErrorField::Detail, ADD_FALLBACK),
                );
                Settled::Failed
            }
        }
    }

    /// Ask for confirmation before deleting `id`
    pub async fn confirm_delete<C>(&self, confirmer: &mut C, id: DocumentId) -> Option<ConfirmedDelete>
    where
        C: Confirm + ?Sized,
    {
        if confirmer.confirm(DELETE_PROMPT).await {
            Some(ConfirmedDelete { id })
        } else {
            tracing::debug!("Delete of {} declined", id);
            None
        }
    }

    /// Delete a confirmed document, then refresh the list.
    ///
    /// The row stays in the local list until the refresh replaces it.
    pub async fn delete_document(&self, confirmed: ConfirmedDelete) -> Settled {
        let Some(loading) = self.store.begin(Tab::Manage) else {
            tracing::debug!("Document operation in flight, ignoring delete");
            return Settled::Skipped;
        };

        tracing::info!("Deleting document {}", confirmed.id);

        match self.gateway.delete_document(&confirmed.id).await {
            Ok(()) => {
                drop(loading);
                self.refresh_documents().await;
                Settled::Succeeded
            }
            Err(err) => {
                tracing::warn!("Delete document failed: {}", err);
                self.store.set_error(
                    Tab::Manage,
                    err.user_message(ErrorField::Detail, DELETE_FALLBACK),
                );
                Settled::Failed
            }
        }
    }
}
