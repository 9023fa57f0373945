use crate::{
    cli::globals::GlobalArgs,
    guard,
    routes::{app_routes, RouteTree},
    session::SessionResolver,
};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;

pub mod handlers;

/// Per-process state shared by every request. Nothing in here is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn SessionResolver>,
    pub routes: Arc<RouteTree>,
    pub globals: Arc<GlobalArgs>,
}

impl AppState {
    #[must_use]
    pub fn new(resolver: Arc<dyn SessionResolver>, routes: RouteTree, globals: GlobalArgs) -> Self {
        Self {
            resolver,
            routes: Arc::new(routes),
            globals: Arc::new(globals),
        }
    }
}

/// Build the application router.
///
/// `/health` and `/auth/*` are public. Every other path falls through to the
/// guarded page renderer, which only runs after the guard allowed the request.
pub fn router(state: AppState) -> Router {
    let guarded = Router::new()
        .fallback(handlers::pages::render)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_session,
        ))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(handlers::health))
        .route(handlers::auth::LOGIN_ROUTE, get(handlers::auth::login))
        .route(handlers::auth::CALLBACK_ROUTE, get(handlers::auth::callback))
        .route(handlers::auth::ERROR_ROUTE, get(handlers::auth::error))
        .with_state(state)
        .fallback_service(guarded)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, globals: GlobalArgs, resolver: Arc<dyn SessionResolver>) -> Result<()> {
    let app = router(AppState::new(resolver, app_routes(), globals));

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Gracefully shutdown");
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
