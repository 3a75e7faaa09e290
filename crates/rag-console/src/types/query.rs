//! Query request/response types

use serde::{Deserialize, Serialize};

/// Response body for `GET /query/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Generated answer
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub answer: String,
}

/// Answer shown in the query panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Generated answer in clear language
    pub answer: String,
    /// Source references, in citation order.
    ///
    /// The backend does not return sources yet, so this is always empty for
    /// now; the panel renders it once it is populated.
    pub sources: Vec<String>,
}

impl From<QueryResponse> for QueryResult {
    fn from(response: QueryResponse) -> Self {
        Self {
            answer: response.answer,
            sources: Vec::new(),
        }
    }
}
