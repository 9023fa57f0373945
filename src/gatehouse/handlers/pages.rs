//! Renderer for the guarded subtree.
//!
//! Runs only behind [`crate::guard::require_session`], so the session it
//! extracts is the one the guard resolved for this request.

use super::html_page;
use crate::{
    components::NavigationShell,
    gatehouse::AppState,
    guard::CurrentSession,
    routes::MatchedRoute,
    views,
};
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::Response,
};
use tracing::{debug, warn};

pub async fn render(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    uri: Uri,
) -> Response {
    let path = uri.path();

    let Some(MatchedRoute { chain, page }) = state.routes.resolve(path) else {
        debug!(path, "no route matched");
        return not_found(&state, path);
    };
    debug!(path, depth = chain.depth(), "route matched");

    let resolved = match chain.resolve().await {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!(path, "route parameters failed to resolve: {err}");
            return not_found(&state, path);
        }
    };

    let params = resolved.leaf_params();
    let leaf = page.render(&session, &params);
    let title = page.title(&params);

    html_page(
        StatusCode::OK,
        &state.globals.site_url,
        &title,
        path,
        resolved.compose(leaf),
    )
}

fn not_found(state: &AppState, path: &str) -> Response {
    html_page(
        StatusCode::NOT_FOUND,
        &state.globals.site_url,
        "Not Found",
        path,
        NavigationShell::default().render(views::not_found()),
    )
}
