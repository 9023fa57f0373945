//! Public sign-in routes: the login entry point, the provider callback, and
//! the authentication error page.

use super::html_page;
use crate::{gatehouse::AppState, guard::LOGIN_PATH, views};
use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

pub const LOGIN_ROUTE: &str = LOGIN_PATH;
pub const CALLBACK_ROUTE: &str = "/auth/callback";
pub const ERROR_ROUTE: &str = "/auth/error";

/// Seconds the sign-in interstitial stays up before moving to `/`.
const SIGN_IN_REFRESH: &str = "1; url=/";

/// Query parameters the identity provider appends to the callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

pub async fn login(State(state): State<AppState>) -> Response {
    html_page(
        StatusCode::OK,
        &state.globals.site_url,
        "Sign in",
        LOGIN_ROUTE,
        views::login(&state.globals.login_url),
    )
}

/// Login callback.
///
/// A reported verification failure ends here with the error view. Anything
/// else shows the loading interstitial, which refreshes into the guarded root
/// once the provider's session cookie is in place.
pub async fn callback(State(state): State<AppState>, Query(query): Query<CallbackQuery>) -> Response {
    if let Some(error) = query.error.as_deref() {
        warn!(
            error,
            description = query.error_description.as_deref().unwrap_or_default(),
            "identity provider reported a verification failure"
        );
        return auth_error_page(&state);
    }

    let mut response = html_page(
        StatusCode::OK,
        &state.globals.site_url,
        "Signing in",
        CALLBACK_ROUTE,
        views::loading(),
    );
    response.headers_mut().insert(
        HeaderName::from_static("refresh"),
        HeaderValue::from_static(SIGN_IN_REFRESH),
    );
    response
}

pub async fn error(State(state): State<AppState>) -> impl IntoResponse {
    auth_error_page(&state)
}

fn auth_error_page(state: &AppState) -> Response {
    html_page(
        StatusCode::UNAUTHORIZED,
        &state.globals.site_url,
        views::AUTH_ERROR_TITLE,
        ERROR_ROUTE,
        views::auth_error(),
    )
}
