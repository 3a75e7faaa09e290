//! rag-console: interactive console client for a RAG backend
//!
//! Three workflows share one store: asking questions, uploading PDFs, and
//! managing the document corpus. The backend is reached only through the
//! [`gateway::BackendGateway`] trait; [`gateway::HttpGateway`] talks to the
//! real REST API.

pub mod config;
pub mod interactive;
pub mod error;
pub mod gateway;
pub mod store;
pub mod tabs;
pub mod types;
pub mod workflows;

pub use config::ConsoleConfig;
pub use error::{Error, GatewayError, Result, ValidationError};
pub use gateway::{BackendGateway, HttpGateway};
pub use store::{AppState, Store};
pub use tabs::{Tab, TabController};
pub use workflows::{Settled, Workflows};
