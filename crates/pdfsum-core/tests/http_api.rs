//! Integration tests for [`HttpApi`] against an in-process stub backend.
//!
//! The stub mimics the REST contract of the summarization server: multipart
//! extraction, JSON summarize/evaluate, the benchmark table and the static
//! chart images.

use std::io::Write;
use std::net::SocketAddr;

use axum::Json;
use axum::extract::Multipart;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

use pdfsum_core::charts::{ChartGallery, ChartState, FALLBACK_IMAGE_URL, fetch_chart};
use pdfsum_core::evaluation::{EMPTY_MESSAGE, EvaluationTable, TableView, load_rows};
use pdfsum_core::session::STATUS_DONE;
use pdfsum_core::{
    ApiError, EvaluationStart, HttpApi, SelectedFile, Session, SummarizerApi, run_evaluation,
    run_process,
};

const TINY_PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR\x00\x00\x01\x90\x00\x00\x01\x2c\x08\x06\x00\x00\x00";

async fn extract(mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("").to_string();
        let data = field.bytes().await.unwrap_or_default();
        if !name.to_lowercase().ends_with(".pdf") {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "File must be a PDF"})),
            )
                .into_response();
        }
        if !data.starts_with(b"%PDF") {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "Error processing file: bad pdf"})),
            )
                .into_response();
        }
        return Json(json!({
            "filename": name,
            "text": format!("{} bytes of text", data.len()),
            "message": "Text extraction successful"
        }))
        .into_response();
    }
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"detail": [{"loc": ["body", "file"], "msg": "field required"}]})),
    )
        .into_response()
}

async fn summarize(Json(body): Json<Value>) -> Json<Value> {
    let text = body["text"].as_str().unwrap_or_default();
    let model = body["model"].as_str().unwrap_or_default();
    Json(json!({
        "summary": format!("**Summary** of {text} by {model}"),
        "keywords": ["alpha", "beta"],
        "runtime_sec": 1.2,
        "tokens_generated": 50,
        "speed_tokens_per_sec": 41.7
    }))
}

async fn evaluate(Json(body): Json<Value>) -> Response {
    if body["text"].as_str().unwrap_or_default().is_empty() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "Evaluation failed: Pipeline execution failed."})),
        )
            .into_response();
    }
    Json(json!({"message": "Evaluation and visualization completed successfully."})).into_response()
}

async fn results() -> Json<Value> {
    Json(json!([
        {
            "model": "llama3.2:1b", "runtime_s": 10.5, "tokens": 400, "memory_MB": 900.0,
            "ROUGE1": 0.4567, "ROUGE2": 0.2, "ROUGEL": 0.3, "BERTScore_F1": 0.85,
            "summary": "a"
        },
        {
            "model": "phi3:mini", "runtime_s": 20.25, "tokens": 380, "memory_MB": "",
            "ROUGE1": 0.5, "ROUGE2": 0.25, "ROUGEL": 0.35, "BERTScore_F1": 0.88,
            "summary": ""
        }
    ]))
}

async fn quality_chart() -> Response {
    ([(header::CONTENT_TYPE, "image/png")], TINY_PNG).into_response()
}

async fn html_chart() -> Response {
    ([(header::CONTENT_TYPE, "text/html")], "<html>nope</html>").into_response()
}

async fn spawn_backend() -> SocketAddr {
    let app = axum::Router::new()
        .route("/api/extract-text", post(extract))
        .route("/api/summarize", post(summarize))
        .route("/api/evaluate", post(evaluate))
        .route("/api/evaluation-results", get(results))
        .route("/static/runtime_vs_quality.png", get(quality_chart))
        .route("/static/runtime_vs_rouge.png", get(html_chart));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn temp_file(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents).unwrap();
    file
}

#[tokio::test]
async fn full_process_run_over_http() {
    let addr = spawn_backend().await;
    let api = HttpApi::new(format!("http://{addr}"));
    let pdf = temp_file(".pdf", b"%PDF-1.7 hello");

    let mut session = Session::new();
    session.select_file(SelectedFile::from_path(pdf.path()).unwrap());
    let ticket = session.begin_process("llama3.2:1b", None).unwrap();
    run_process(&api, ticket, |e| {
        session.apply(e);
    })
    .await;

    assert_eq!(session.extracted_text, "14 bytes of text");
    assert_eq!(session.summary, "**Summary** of 14 bytes of text by llama3.2:1b");
    assert_eq!(session.keywords, vec!["alpha".to_string(), "beta".to_string()]);
    assert_eq!(session.stats.as_ref().unwrap().tokens_generated, 50);
    assert_eq!(session.status, STATUS_DONE);
    assert!(!session.loading);
}

#[tokio::test]
async fn backend_detail_becomes_status() {
    let addr = spawn_backend().await;
    let api = HttpApi::new(format!("http://{addr}"));
    let pdf = temp_file(".pdf", b"not really a pdf");

    let mut session = Session::new();
    session.select_file(SelectedFile::from_path(pdf.path()).unwrap());
    let ticket = session.begin_process("llama3.2:1b", None).unwrap();
    run_process(&api, ticket, |e| {
        session.apply(e);
    })
    .await;

    assert_eq!(session.status, "Error: Error processing file: bad pdf");
    assert!(session.summary.is_empty());
    assert!(!session.loading);
}

#[tokio::test]
async fn unreachable_backend_reports_transport_error() {
    // Bind then drop to get a port nobody is listening on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpApi::new(format!("http://{addr}"));
    let err = api.evaluation_results().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn evaluation_reveals_benchmarks_and_table_loads() {
    let addr = spawn_backend().await;
    let api = HttpApi::new(format!("http://{addr}"));

    let mut session = Session::new();
    session.extracted_text = "some text".into();
    let EvaluationStart::Started(ticket) = session.begin_evaluation() else {
        panic!("expected an evaluation to start");
    };
    run_evaluation(&api, ticket, |e| {
        session.apply(e);
    })
    .await;
    assert!(session.show_benchmarks);

    let mut table = EvaluationTable::new(1);
    table.apply(1, load_rows(&api).await);
    let TableView::Rows(rows) = table.view() else {
        panic!("expected rows, got {:?}", table.view());
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].model, "llama3.2:1b");
    assert_eq!(rows[0].rouge1, "45.7%");
    assert_eq!(rows[1].memory, "0.0");
}

#[tokio::test]
async fn evaluation_failure_alerts() {
    let addr = spawn_backend().await;
    let api = HttpApi::new(format!("http://{addr}"));

    let mut session = Session::new();
    let EvaluationStart::Started(ticket) = session.begin_evaluation() else {
        panic!("expected an evaluation to start");
    };
    run_evaluation(&api, ticket, |e| {
        session.apply(e);
    })
    .await;
    assert!(!session.show_benchmarks);
    assert!(session.alert.is_some());
}

#[tokio::test]
async fn empty_results_render_empty_state() {
    let app = axum::Router::new().route("/api/evaluation-results", get(|| async { Json(json!([])) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api = HttpApi::new(format!("http://{addr}"));
    let mut table = EvaluationTable::new(1);
    table.apply(1, load_rows(&api).await);
    assert_eq!(table.view(), TableView::Empty(EMPTY_MESSAGE));
}

#[tokio::test]
async fn charts_fall_back_per_image() {
    let addr = spawn_backend().await;
    let base = format!("http://{addr}");
    let api = HttpApi::new(base.clone());

    let mut gallery = ChartGallery::new(&base, 42);
    for (index, url) in gallery.urls().into_iter().enumerate() {
        let result = fetch_chart(&api, &url).await;
        gallery.apply(42, index, result);
    }

    assert_eq!(
        gallery.images[0].state,
        ChartState::Loaded {
            bytes: TINY_PNG.len(),
            dimensions: Some((400, 300)),
        }
    );
    // 200 with a non-image body
    assert_eq!(gallery.images[1].state, ChartState::Fallback);
    // 404
    assert_eq!(gallery.images[2].state, ChartState::Fallback);
    assert_eq!(gallery.images[2].source(), FALLBACK_IMAGE_URL);
}
