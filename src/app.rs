//! Router assembly and shared handler state.

use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::config::Config;
use crate::models::{
    DepartmentHit, PaginationMeta, ProgramHit, SearchResponse, SubscribeRequest,
    SubscribeResponse, Summary, TipReceipt, TipRequest,
};
use crate::routes::{self, health::HealthStatus};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "California Spending API",
        description = "State vendor payments, departments and budget programs"
    ),
    paths(
        routes::listing::list_vendors,
        routes::listing::list_departments,
        routes::listing::list_programs,
        routes::search::search,
        routes::forms::submit_tip,
        routes::forms::subscribe,
        routes::health::health,
    ),
    components(schemas(
        PaginationMeta,
        Summary,
        SearchResponse,
        DepartmentHit,
        ProgramHit,
        TipRequest,
        TipReceipt,
        SubscribeRequest,
        SubscribeResponse,
        HealthStatus,
    ))
)]
pub struct ApiDoc;

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(err)) => {
            tracing::warn!(error = %err, "Ignoring invalid CORS origin, allowing any");
            AllowOrigin::from(Any)
        }
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());

    let api = Router::new()
        .route("/vendors", get(routes::list_vendors))
        .route("/departments", get(routes::list_departments))
        .route("/programs", get(routes::list_programs))
        .route("/search", get(routes::search))
        .route("/tips", post(routes::submit_tip))
        .route("/subscribe", post(routes::subscribe))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }));

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
