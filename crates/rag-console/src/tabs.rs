//! Tab controller: which workflow's panel is rendered

use std::fmt;
use std::str::FromStr;

use crate::store::{AppState, Store};

/// Console tabs, one per workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    /// Ask questions
    #[default]
    Query,
    /// Upload PDFs
    Upload,
    /// Add, list and delete documents
    Manage,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Query, Tab::Upload, Tab::Manage];

    /// Title shown in the tab bar
    pub fn label(&self) -> &'static str {
        match self {
            Self::Query => "Query Documents",
            Self::Upload => "Upload PDF",
            Self::Manage => "Manage Documents",
        }
    }

    /// Position in the tab bar, starting at 1
    pub fn number(&self) -> usize {
        match self {
            Self::Query => 1,
            Self::Upload => 2,
            Self::Manage => 3,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::Upload => "upload",
            Self::Manage => "manage",
        })
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "query" | "q" => Ok(Self::Query),
            "2" | "upload" | "u" | "pdf" => Ok(Self::Upload),
            "3" | "manage" | "m" | "documents" | "docs" => Ok(Self::Manage),
            other => Err(format!(
                "Unknown tab '{}'. Use query, upload or manage (or 1, 2, 3)",
                other
            )),
        }
    }
}

/// Switches the active panel. Selecting a tab never starts, stops or
/// otherwise touches a workflow.
#[derive(Clone)]
pub struct TabController {
    store: Store,
}

impl TabController {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Make `tab` the active panel
    pub fn select(&self, tab: Tab) {
        self.store.update(|state| state.active_tab = tab);
        tracing::debug!("Switched to {} tab", tab);
    }

    pub fn active(&self) -> Tab {
        self.store.read(|state: &AppState| state.active_tab)
    }
}
