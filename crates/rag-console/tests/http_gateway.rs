//! HttpGateway against an in-process mock backend

use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use rag_console::error::{GatewayError, UNREACHABLE_MESSAGE};
use rag_console::gateway::{BackendGateway, HttpGateway};
use rag_console::types::{DocumentId, Metadata, NewDocument, PdfUpload, PDF_MIME};
use rag_console::{Settled, Store, Tab, TabController, Workflows};

/// Requests seen by the mock backend
#[derive(Default)]
struct Seen {
    queries: Vec<String>,
    added: Vec<Value>,
    deleted: Vec<String>,
    uploads: Vec<(String, String, String, usize)>,
}

type Shared = Arc<Mutex<Seen>>;

async fn list_documents() -> Json<Value> {
    Json(json!({
        "documents": [
            {
                "id": "doc-1",
                "content_preview": "Rust is a systems language",
                "metadata": {"source": "manual"},
                "created_at": "2024-05-01T12:00:00Z"
            },
            {
                "id": 2,
                "content_preview": "Second",
                "metadata": null,
                "created_at": "2024-05-02T08:30:00"
            }
        ]
    }))
}

async fn add_document(State(seen): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["content"] == "reject me" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": "Content is too short"})),
        );
    }
    seen.lock().unwrap().added.push(body);
    (StatusCode::OK, Json(json!({"status": "added"})))
}

async fn delete_document(State(seen): State<Shared>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Document not found"})),
        );
    }
    seen.lock().unwrap().deleted.push(id);
    (StatusCode::OK, Json(json!({"status": "deleted"})))
}

async fn query(State(seen): State<Shared>, RawQuery(raw): RawQuery) -> (StatusCode, Json<Value>) {
    let raw = raw.unwrap_or_default();
    seen.lock().unwrap().queries.push(raw.clone());
    if raw.contains("fail") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "overloaded"})),
        );
    }
    (StatusCode::OK, Json(json!({"answer": "X is Y"})))
}

async fn upload_pdf(State(seen): State<Shared>, mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        seen.lock()
            .unwrap()
            .uploads
            .push((name, file_name, content_type, bytes.len()));
    }
    Json(json!({
        "status": "PDF processed",
        "message": "report.pdf uploaded and indexed.",
        "tables": ["a", "b"]
    }))
}

async fn spawn_backend() -> (SocketAddr, Shared) {
    let seen = Shared::default();
    let app = Router::new()
        .route("/documents", get(list_documents).post(add_document))
        .route("/documents/:id", delete(delete_document))
        .route("/query/", get(query))
        .route("/upload-pdf/", post(upload_pdf))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

fn gateway(addr: SocketAddr) -> HttpGateway {
    HttpGateway::with_client(reqwest::Client::new(), &format!("http://{}/", addr))
}

#[tokio::test]
async fn test_query_is_percent_encoded() {
    let (addr, seen) = spawn_backend().await;

    let response = gateway(addr).query("What is X & Y?").await.unwrap();
    assert_eq!(response.answer, "X is Y");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.queries.len(), 1);
    assert_eq!(seen.queries[0], "q=What%20is%20X%20%26%20Y%3F");
}

#[tokio::test]
async fn test_query_error_body_is_backend_error() {
    let (addr, _) = spawn_backend().await;

    let err = gateway(addr).query("please fail").await.unwrap_err();
    match err {
        GatewayError::Backend { status, body } => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body.error.as_deref(), Some("overloaded"));
        }
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_documents_accepts_numeric_ids_and_null_metadata() {
    let (addr, _) = spawn_backend().await;

    let documents = gateway(addr).list_documents().await.unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].id.as_str(), "doc-1");
    assert_eq!(documents[1].id.as_str(), "2");
    assert!(documents[1].metadata.is_empty());
    assert!(documents[0].created_at_local().is_some());
}

#[tokio::test]
async fn test_add_document_sends_json_body() {
    let (addr, seen) = spawn_backend().await;
    let gateway = gateway(addr);

    let document = NewDocument {
        content: "hello".to_string(),
        metadata: Metadata::parse(r#"{"source": "manual"}"#).unwrap(),
    };
    gateway.add_document(&document).await.unwrap();
    assert_eq!(
        seen.lock().unwrap().added,
        vec![json!({"content": "hello", "metadata": {"source": "manual"}})]
    );

    let rejected = NewDocument {
        content: "reject me".to_string(),
        metadata: Metadata::default(),
    };
    let err = gateway.add_document(&rejected).await.unwrap_err();
    match err {
        GatewayError::Backend { status, body } => {
            assert_eq!(status, reqwest::StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body.detail.as_deref(), Some("Content is too short"));
        }
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_document_uses_id_path() {
    let (addr, seen) = spawn_backend().await;
    let gateway = gateway(addr);

    gateway.delete_document(&DocumentId::new("doc-1")).await.unwrap();
    assert_eq!(seen.lock().unwrap().deleted, vec!["doc-1".to_string()]);

    let err = gateway
        .delete_document(&DocumentId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Backend { .. }));
}

#[tokio::test]
async fn test_upload_pdf_sends_multipart_file_field() {
    let (addr, seen) = spawn_backend().await;

    let upload = PdfUpload {
        name: "report.pdf".to_string(),
        mime: PDF_MIME.to_string(),
        bytes: b"%PDF-1.7 test".to_vec(),
    };
    let result = gateway(addr).upload_pdf(&upload).await.unwrap();
    assert_eq!(result.status, "PDF processed");
    assert_eq!(result.tables, vec!["a".to_string(), "b".to_string()]);

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.uploads,
        vec![(
            "file".to_string(),
            "report.pdf".to_string(),
            PDF_MIME.to_string(),
            13
        )]
    );
}

#[tokio::test]
async fn test_closed_port_is_transport_error() {
    // Bind then drop a listener to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = gateway(addr).list_documents().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }));
}

#[tokio::test]
async fn test_workflows_end_to_end() {
    let (addr, seen) = spawn_backend().await;
    let workflows = Workflows::new(Store::new(), Arc::new(gateway(addr)));
    let tabs = TabController::new(workflows.store().clone());

    workflows.set_query("What is X?");
    assert_eq!(workflows.submit_query().await, Settled::Succeeded);
    assert_eq!(
        workflows.store().snapshot().query.result.unwrap().answer,
        "X is Y"
    );

    tabs.select(Tab::Manage);
    workflows.set_document_content("hello");
    workflows.set_document_metadata(r#"{"source": "manual"}"#);
    assert_eq!(workflows.add_document().await, Settled::Succeeded);

    let state = workflows.store().snapshot();
    assert_eq!(state.document_count(), 2);
    assert!(state.manage.content_input.is_empty());
    assert!(state.banner().is_none());
    assert_eq!(seen.lock().unwrap().added.len(), 1);
}

#[tokio::test]
async fn test_unreachable_backend_sets_fixed_banner() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let workflows = Workflows::new(Store::new(), Arc::new(gateway(addr)));
    workflows.set_query("anyone there?");
    assert_eq!(workflows.submit_query().await, Settled::Failed);
    assert_eq!(
        workflows.store().snapshot().banner(),
        Some(UNREACHABLE_MESSAGE)
    );
}
