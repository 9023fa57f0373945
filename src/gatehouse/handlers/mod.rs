pub mod auth;
pub mod health;
pub use self::health::health;
pub mod pages;

use crate::{components::document, layout::Node};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use url::Url;

// common response builder for the server-rendered handlers
fn html_page(status: StatusCode, site_url: &Url, title: &str, path: &str, body: Node) -> Response {
    (status, Html(document(site_url, title, path, body))).into_response()
}
