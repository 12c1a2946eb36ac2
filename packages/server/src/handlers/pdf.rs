use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use common::storage::FileKey;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Serve the raw bytes of a stored document.
#[utoipa::path(
    get,
    path = "/pdf/{key}",
    tag = "Documents",
    operation_id = "servePdf",
    summary = "Fetch a stored PDF",
    params(("key" = String, Path, description = "Stored document key")),
    responses(
        (status = 200, description = "Raw PDF bytes, content-type application/pdf"),
        (status = 404, description = "Unknown document key (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn serve_pdf(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let key = FileKey::parse(&key)?;
    let reader = state.store.open(&key).await?;
    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(key.display_name()),
        )
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Build a safe inline `Content-Disposition` header value.
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let name = if ascii_safe.is_empty() {
        "document.pdf".to_string()
    } else {
        ascii_safe
    };
    format!("inline; filename=\"{name}\"")
}
