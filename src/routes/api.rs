use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;

use crate::AppState;
use crate::clients::aggregator;
use crate::models::views::MetricsReport;

// Cluster failures are reported in the JSON body; the status stays 200.

pub async fn handle_health(State(state): State<AppState>) -> Response {
    match state.reader.probe().await {
        Ok(()) => Json(json!({ "status": "healthy" })).into_response(),
        Err(e) => {
            warn!(error = %e, "cluster health probe failed");
            Json(json!({ "status": "unhealthy", "error": e.to_string() })).into_response()
        }
    }
}

pub async fn handle_metrics(State(state): State<AppState>) -> Response {
    match aggregator::collect(state.reader.as_ref()).await {
        Ok(agg) => Json(MetricsReport::from(agg)).into_response(),
        Err(e) => {
            warn!(error = %e, "collecting cluster metrics failed");
            Json(json!({ "error": e.to_string() })).into_response()
        }
    }
}
