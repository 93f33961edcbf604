//! HTTP routing layer
//!
//! Every route is stateless: the sample dataset is regenerated from the
//! configured seed on each request and uploads are dropped once answered.
//! The only shared value is the immutable [`ServerConfig`].

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::chart;
use crate::config::ServerConfig;
use crate::dataset::Dataset;
use crate::error::AppError;
use crate::pages;
use crate::runner::{run_test, TestKind, TestResult};
use crate::upload::{self, TablePreview, UploadError};

/// Router state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

#[derive(Debug, Deserialize)]
struct ExecuteRequest {
    test_type: String,
}

#[derive(Debug, Serialize)]
struct ExecuteResponse {
    success: bool,
    resultats: TestResult,
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    success: bool,
    #[serde(flatten)]
    table: TablePreview,
}

/// Build the application router
pub fn router(config: ServerConfig) -> Router {
    let body_limit = config.max_upload_bytes;
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(index))
        .route("/tests", get(tests))
        .route("/execute_test", post(execute_test))
        .route("/upload_data", post(upload_data))
        .route("/about", get(about))
        .route("/documentation", get(documentation))
        .route("/static/js/script.js", get(script))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

async fn index() -> Html<String> {
    Html(pages::index_page())
}

async fn tests(State(state): State<AppState>) -> Html<String> {
    let dataset = Dataset::generate(state.config.seed);
    let preview = dataset.preview(state.config.preview_rows);
    Html(pages::tests_page(&dataset.columns(), &preview))
}

async fn about() -> Html<String> {
    Html(pages::about_page())
}

async fn documentation() -> Html<String> {
    Html(pages::documentation_page())
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        pages::SCRIPT,
    )
}

async fn execute_test(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExecuteResponse>, AppError> {
    let request: ExecuteRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidRequest(e.to_string()))?;
    let kind: TestKind = request.test_type.parse()?;

    let seed = state.config.seed;
    let friedman_seed = state.config.friedman_seed;
    let result = tokio::task::spawn_blocking(move || -> Result<TestResult, AppError> {
        let dataset = Dataset::generate(seed);
        let result = run_test(kind, &dataset, friedman_seed)?;
        Ok(result.with_chart(chart::render_sample_chart()?))
    })
    .await??;

    Ok(Json(ExecuteResponse {
        success: true,
        resultats: result,
    }))
}

async fn upload_data(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    // a request that is not multipart carries no file at all
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("upload without multipart body: {}", rejection);
        UploadError::NoFileSelected
    })?;

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Multipart(e.to_string()))?;
        file = Some((filename, bytes));
        break;
    }

    let (filename, bytes) = file.ok_or(UploadError::NoFileSelected)?;
    let name = upload::validate_filename(filename.as_deref())?;
    let table = upload::preview_csv(&bytes, state.config.preview_rows)?;
    tracing::info!(file = name, columns = table.columns.len(), "upload parsed");

    Ok(Json(UploadResponse {
        success: true,
        table,
    }))
}
