use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use log::{error, info};
use serde_json::json;
use trend_model::adapter::{InferenceAdapter, Prediction};
use trend_model::schema::FeatureRow;

use crate::pages;

/// Shared application state: the adapter and both artifacts behind it are
/// immutable after startup, so a plain `Arc` suffices.
#[derive(Clone)]
pub struct AppState {
    adapter: Arc<InferenceAdapter>,
}

impl AppState {
    pub fn new(adapter: InferenceAdapter) -> Self {
        Self { adapter: Arc::new(adapter) }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_api))
        .with_state(state)
}

/// GET / renders the form pre-filled with the documented defaults.
async fn index() -> Html<String> {
    Html(pages::page(&FeatureRow::default(), None, None))
}

/// POST /predict handles a form submission and re-renders the page with the
/// result, or with the error inline above the form. A failed prediction never
/// takes the process down.
async fn predict_form(State(state): State<AppState>, Form(row): Form<FeatureRow>) -> Html<String> {
    match run_prediction(&state, &row) {
        Ok(prediction) => Html(pages::page(&row, Some(&prediction), None)),
        Err(message) => Html(pages::page(&row, None, Some(&message))),
    }
}

/// POST /api/predict is the same operation over JSON: 422 for input the
/// collector rejects, 500 for a failure inside the adapter.
async fn predict_api(State(state): State<AppState>, Json(row): Json<FeatureRow>) -> Response {
    if let Err(e) = row.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": e.to_string() })))
            .into_response();
    }
    match state.adapter.predict(&row) {
        Ok(prediction) => Json(prediction).into_response(),
        Err(e) => {
            error!("Prediction failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() })))
                .into_response()
        }
    }
}

fn run_prediction(state: &AppState, row: &FeatureRow) -> Result<Prediction, String> {
    row.validate().map_err(|e| e.to_string())?;
    state.adapter.predict(row).map_err(|e| {
        error!("Prediction failed: {e}");
        e.to_string()
    })
}

pub async fn serve(state: AppState) -> Result<()> {
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server running on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
