//! HTTP surface: JSON status endpoints, demo page redirect and static files.
use crate::catalog::{CommandCatalog, Platform};
use crate::command::ShellCommandRunner;
use crate::config::AppConfig;
use crate::error::StatusError;
use crate::status::StatusService;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    handler::HandlerWithoutStateExt,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use http::{
    header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, LOCATION},
    StatusCode, Uri,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{error, info};

/// Where `/` redirects to, relative to the static directory.
pub const DEMO_PAGE: &str = "./public/demo.html";

const BATTERY_PATHS: [&str; 1] = ["/battery"];
const WIFI_PATHS: [&str; 3] = ["/network", "/networks", "/wifi"];
const NOT_FOUND_MESSAGE: &str = "404 - Resource Not found";

type SharedStatus = State<Arc<StatusService>>;

/// Build the application router.
///
/// Each status path also answers with a trailing `/` and under any sub path,
/// everything else is looked up in `static_dir`.
pub fn router(status: StatusService, static_dir: impl AsRef<Path>) -> Router {
    let static_files =
        ServeDir::new(static_dir.as_ref()).not_found_service(not_found.into_service());

    let mut app = Router::new().route("/", get(redirect_to_demo));
    for path in BATTERY_PATHS {
        app = app
            .route(path, get(battery))
            .route(&format!("{path}/"), get(battery))
            .route(&format!("{path}/{{*rest}}"), get(battery));
    }
    for path in WIFI_PATHS {
        app = app
            .route(path, get(wifi))
            .route(&format!("{path}/"), get(wifi))
            .route(&format!("{path}/{{*rest}}"), get(wifi));
    }
    app.fallback_service(static_files)
        .with_state(Arc::new(status))
}

/// Serve the status endpoints until Ctrl-C.
pub async fn serve(config: AppConfig) -> Result<()> {
    let catalog = CommandCatalog::new(
        Platform::current(),
        &config.interface_name,
        &config.battery_device,
    );
    info!("Using {:?}", catalog);
    let status = StatusService::new(catalog, Arc::new(ShellCommandRunner));
    let app = router(status, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Binding {addr}"))?;
    info!("Server running on port {}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Serving HTTP")?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            error!("Unable to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await
        }
    }
}

async fn redirect_to_demo() -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(LOCATION, DEMO_PAGE)]).into_response()
}

async fn battery(State(status): SharedStatus, uri: Uri) -> Response {
    info!("GET {}", uri);
    json_or_error(status.battery().await)
}

async fn wifi(State(status): SharedStatus, uri: Uri) -> Response {
    info!("GET {}", uri);
    json_or_error(status.wifi().await)
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, "text/plain")],
        NOT_FOUND_MESSAGE,
    )
        .into_response()
}

fn json_or_error<T: Serialize>(res: Result<T, StatusError>) -> Response {
    match res {
        Ok(record) => ([(ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(record)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain")],
            e.to_string(),
        )
            .into_response(),
    }
}
