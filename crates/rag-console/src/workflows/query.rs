//! Query workflow

use super::{Settled, Workflows};
use crate::error::ErrorField;
use crate::tabs::Tab;

/// Banner text when the backend fails without an `error` field
pub const QUERY_FALLBACK: &str = "An error occurred while processing your query.";

impl Workflows {
    /// Replace the question being edited
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.store.update(|state| state.query.input = text);
    }

    /// Ask the backend the current question
    pub async fn submit_query(&self) -> Settled {
        let question = self.store.read(|state| state.query.input.clone());
        if question.trim().is_empty() {
            return Settled::Skipped;
        }

        let Some(_loading) = self.store.begin(Tab::Query) else {
            tracing::debug!("Query already in flight, ignoring submit");
            return Settled::Skipped;
        };

        tracing::info!("Query: \"{}\"", question);

        match self.gateway.query(&question).await {
            Ok(response) => {
                tracing::info!("Query answered ({} chars)", response.answer.len());
                self.store
                    .update(|state| state.query.result = Some(response.into()));
                Settled::Succeeded
            }
            Err(err) => {
                tracing::warn!("Query failed: {}", err);
                self.store.set_error(
                    Tab::Query,
                    err.user_message(ErrorField::Error, QUERY_FALLBACK),
                );
                Settled::Failed
            }
        }
    }
}
