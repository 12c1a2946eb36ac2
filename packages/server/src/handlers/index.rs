use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use tracing::instrument;

use crate::error::AppError;
use crate::models::files::RecentFileView;
use crate::state::AppState;

use super::take_flash;

/// How many entries the "recent files" list shows.
const RECENT_FILES_LIMIT: usize = 5;

/// Upload form plus the recent-files listing.
#[instrument(skip(state, jar))]
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, flash) = take_flash(jar);

    let recent = state.store.list_recent(RECENT_FILES_LIMIT).await?;
    let recent_files: Vec<RecentFileView> = recent.iter().map(RecentFileView::from).collect();

    let template = state.templates.get_template("index.html")?;
    let html = template.render(context! {
        recent_files => recent_files,
        flash => flash,
    })?;

    Ok((jar, Html(html)))
}
