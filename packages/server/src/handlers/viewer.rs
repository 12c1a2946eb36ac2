use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use common::storage::FileKey;
use minijinja::context;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::viewer;

use super::flash;

/// Viewer page for one stored document. Unknown or malformed keys send
/// the user back to the upload screen with a message.
#[instrument(skip(state, jar))]
pub async fn view(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let Ok(key) = FileKey::parse(&key) else {
        return Ok(not_found(jar).into_response());
    };
    if !state.store.exists(&key).await? {
        return Ok(not_found(jar).into_response());
    }

    let template = state.templates.get_template("viewer.html")?;
    let html = template.render(context! {
        file_key => key.as_str(),
        display_name => key.display_name(),
        viewer => viewer::script_config(),
    })?;

    Ok(Html(html).into_response())
}

fn not_found(jar: CookieJar) -> (CookieJar, Redirect) {
    (flash(jar, "File not found"), Redirect::to("/"))
}
