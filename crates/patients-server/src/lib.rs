//! HTTP API for the patient record service.
//!
//! Routes:
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | service banner |
//! | GET | `/about` | service description |
//! | GET | `/health` | health check |
//! | GET | `/view` | full collection |
//! | GET | `/patient/{patient_id}` | record by id |
//! | GET | `/sort` | records sorted by height/weight/bmi |
//! | POST | `/create` | create record |
//! | PUT | `/edit/{patient_id}` | partial update |
//! | DELETE | `/delete/{patient_id}` | delete record |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use state::ServerState;

/// Builds the application router with CORS and request tracing layers.
pub fn app(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/view", get(handlers::patients::view))
        .route("/patient/{patient_id}", get(handlers::patients::get))
        .route("/sort", get(handlers::sort::sort))
        .route("/create", post(handlers::patients::create))
        .route("/edit/{patient_id}", put(handlers::patients::update))
        .route("/delete/{patient_id}", delete(handlers::patients::delete))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/", get(handlers::root))
        .route("/about", get(handlers::about))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
