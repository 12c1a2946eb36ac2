use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::upload::{UploadError, allowed_file, stream_field_to_store};

use super::flash;

/// Body limit for the upload route: the configured document maximum
/// plus headroom for multipart framing.
pub fn upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_upload_size as usize + 64 * 1024)
}

/// Accept a single `file` multipart field, validate, store, and
/// redirect to the viewer. Every rejection becomes a flash message on
/// the upload screen; no partial file survives a rejection.
#[instrument(skip(state, jar, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), AppError> {
    let mut outcome: Result<_, UploadError> = Err(UploadError::Empty);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue; // Ignore unknown fields.
        }

        let file_name = field.file_name().unwrap_or_default().trim().to_string();
        if file_name.is_empty() {
            outcome = Err(UploadError::Empty);
            break;
        }
        if !allowed_file(&file_name) {
            outcome = Err(UploadError::UnsupportedType);
            break;
        }

        outcome = stream_field_to_store(
            field,
            &file_name,
            &*state.store,
            state.config.storage.max_upload_size,
        )
        .await;
        break;
    }

    match outcome {
        Ok(doc) => {
            tracing::info!(key = %doc.key, size = doc.size, "stored upload");
            Ok((jar, Redirect::to(&format!("/view/{}", doc.key))))
        }
        Err(err) => {
            tracing::info!("rejected upload: {err}");
            Ok((flash(jar, &err.to_string()), Redirect::to("/")))
        }
    }
}
