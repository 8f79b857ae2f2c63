//! HTTP transport for the profile service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /github`: create a profile, `201` + `{ "documentId": ... }`.
//! - `GET /github`: list profiles (empty when the store is unavailable).
//! - `GET /github/:id`: one profile.
//! - `PUT /github/:id`: merge the body into the stored profile.
//! - `DELETE /github/:id`: delete; `{ "deleted": true }` only when confirmed.
//! - `GET /health`: `{ "ok": true }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use github_profiles::{http, GoogleGeocoder, InMemoryDocumentStore, ProfileService};
//!
//! let service = Arc::new(ProfileService::new(InMemoryDocumentStore::new(), GoogleGeocoder::new(key)));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:3000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::signal;
use tracing::{error, info};

use crate::document::DocumentStore;
use crate::error::ProfileError;
use crate::geocoding::CoordinateLookup;
use crate::profile::{ProfileInput, ProfileService};

/// Build an axum `Router` serving the profile routes.
pub fn router<S, G>(service: Arc<ProfileService<S, G>>) -> Router
where
    S: DocumentStore + 'static,
    G: CoordinateLookup + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/github",
            get(find_all_handler::<S, G>).post(create_handler::<S, G>),
        )
        .route(
            "/github/:id",
            get(find_one_handler::<S, G>)
                .put(update_handler::<S, G>)
                .delete(remove_handler::<S, G>),
        )
        .with_state(service)
}

/// Serve the profile routes at `addr` (e.g. `"0.0.0.0:3000"`) until Ctrl+C or SIGTERM.
pub async fn serve<S, G>(service: Arc<ProfileService<S, G>>, addr: &str) -> Result<(), std::io::Error>
where
    S: DocumentStore + 'static,
    G: CoordinateLookup + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if self.is_upstream() {
            error!(error = %self, "upstream failure");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `POST /github`
async fn create_handler<S: DocumentStore, G: CoordinateLookup>(
    State(service): State<Arc<ProfileService<S, G>>>,
    Json(body): Json<ProfileInput>,
) -> Result<Response, ProfileError> {
    let id = service.create(body).await?;
    Ok((StatusCode::CREATED, Json(id)).into_response())
}

/// `GET /github`
async fn find_all_handler<S: DocumentStore, G: CoordinateLookup>(
    State(service): State<Arc<ProfileService<S, G>>>,
) -> Response {
    Json(service.find_all().await).into_response()
}

/// `GET /github/:id`
async fn find_one_handler<S: DocumentStore, G: CoordinateLookup>(
    State(service): State<Arc<ProfileService<S, G>>>,
    Path(id): Path<String>,
) -> Result<Response, ProfileError> {
    let profile = service.find_one(&id).await?;
    Ok(Json(profile).into_response())
}

/// `PUT /github/:id`
async fn update_handler<S: DocumentStore, G: CoordinateLookup>(
    State(service): State<Arc<ProfileService<S, G>>>,
    Path(id): Path<String>,
    Json(body): Json<ProfileInput>,
) -> Result<Response, ProfileError> {
    let ack = service.update(&id, body).await?;
    Ok(Json(ack).into_response())
}

/// `DELETE /github/:id`
///
/// An unconfirmed delete answers `409` so it can't be mistaken for success.
async fn remove_handler<S: DocumentStore, G: CoordinateLookup>(
    State(service): State<Arc<ProfileService<S, G>>>,
    Path(id): Path<String>,
) -> Result<Response, ProfileError> {
    match service.remove(&id).await? {
        Some(outcome) => Ok(Json(outcome).into_response()),
        None => Ok((
            StatusCode::CONFLICT,
            Json(json!({ "error": format!("delete of github-profile {} was not confirmed", id) })),
        )
            .into_response()),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
