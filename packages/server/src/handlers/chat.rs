use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::state::AppState;

/// Chat about the currently open document.
///
/// The proxy resolves every upstream failure to a displayable reply, so
/// this endpoint only errors on genuinely unexpected conditions.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    operation_id = "chat",
    summary = "Ask the assistant about the open document",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 500, description = "Unexpected failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, request))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = state
        .chat
        .complete(&request.message, &request.history, &request.context)
        .await;

    Ok(Json(ChatResponse { response }))
}
