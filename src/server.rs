use askama::Template;
use axum::{
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use hyper::Server;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::app::{load_dataset, BenefitsSource, LoadStatus};
use crate::error::{BenefitsError, Result};
use crate::presentation::table::COLUMN_HEADERS;
use crate::presentation::{Controls, DirectorBoard, RenderedTable};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<RwLock<DirectorBoard>>,
    pub source: Arc<dyn BenefitsSource>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(board: DirectorBoard, source: Arc<dyn BenefitsSource>) -> Self {
        Self {
            board: Arc::new(RwLock::new(board)),
            source,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Run one load against the shared board. The fetch happens outside the
/// lock; returns false when another load was already in flight.
pub async fn refresh_board(state: &AppState, force_refresh: bool) -> bool {
    if !state.board.write().await.begin_loading(force_refresh) {
        return false;
    }
    let outcome = load_dataset(state.source.as_ref()).await;
    state.board.write().await.apply_load(outcome);
    true
}

/// Dimension and sort chosen through the page's selects
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    pub dimension: Option<String>,
    pub sort: Option<String>,
}

/// Snapshot of the board with the request's selections applied. Unknown
/// keys are ignored and the board's own selection stays in effect.
async fn view(state: &AppState, params: &ViewParams) -> DirectorBoard {
    let mut board = state.board.read().await.clone();
    if let Some(dimension) = params.dimension.as_deref() {
        board.select_dimension(dimension);
    }
    if let Some(sort) = params.sort.as_deref() {
        board.select_sort(sort);
    }
    board
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "director-benefits",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn index(State(state): State<AppState>, Query(params): Query<ViewParams>) -> Response {
    let board = view(&state, &params).await;
    match BoardTemplate::new(&board).render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render board page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

async fn directors_json(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> impl IntoResponse {
    let board = view(&state, &params).await;
    Json(serde_json::json!({
        "status": board.status(),
        "origin": board.origin(),
        "loading": board.is_loading(),
        "controls": board.controls(),
        "table": board.render_table(),
    }))
}

async fn refresh(State(state): State<AppState>) -> Response {
    if refresh_board(&state, true).await {
        Redirect::to("/").into_response()
    } else {
        (StatusCode::CONFLICT, "A refresh is already in progress").into_response()
    }
}

async fn metrics_text(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

/// Create the HTTP server with all routes
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/refresh", post(refresh))
        .route("/api/directors", get(directors_json))
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

/// Start the HTTP server on the specified port
pub async fn start_server(state: AppState, port: u16) -> Result<()> {
    let app = create_server(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "Director benefits board listening");
    println!("HTTP server running on http://localhost:{port}");
    println!("Health check: http://localhost:{port}/health");

    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| BenefitsError::Server(e.to_string()))
}

/// The board page
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate<'a> {
    pub status: &'a LoadStatus,
    pub controls: &'a Controls,
    pub table: RenderedTable,
    pub headers: [&'static str; 5],
    pub loading: bool,
}

impl<'a> BoardTemplate<'a> {
    pub fn new(board: &'a DirectorBoard) -> Self {
        Self {
            status: board.status(),
            controls: board.controls(),
            table: board.render_table(),
            headers: COLUMN_HEADERS,
            loading: board.is_loading(),
        }
    }
}
