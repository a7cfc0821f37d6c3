use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::app::adb::devices::list_devices;
use crate::app::adb::exec::Execution;
use crate::app::error::AppError;
use crate::app::mcp::TOOL_GET_DEVICES;

pub struct HttpState {
    pub execution: Arc<dyn Execution>,
    pub adb_program: String,
}

/// The only accepted body shape; any extra fields are ignored.
#[derive(Debug, Deserialize)]
pub struct DevicesRequest {
    #[serde(default)]
    pub tool: String,
}

pub fn router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/devices", post(devices_handler))
        .with_state(state)
}

async fn devices_handler(
    State(state): State<Arc<HttpState>>,
    Json(request): Json<DevicesRequest>,
) -> Response {
    let trace_id = Uuid::new_v4().to_string();

    if request.tool != TOOL_GET_DEVICES {
        let err = AppError::validation(
            format!("Unknown tool: {}", request.tool),
            trace_id.as_str(),
        );
        return (StatusCode::BAD_REQUEST, Json(err)).into_response();
    }

    let execution = Arc::clone(&state.execution);
    let program = state.adb_program.clone();
    let worker_trace_id = trace_id.clone();
    // The core blocks on child processes; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || {
        list_devices(execution.as_ref(), &program, &worker_trace_id)
    })
    .await;

    match result {
        Ok(Ok(devices)) => (StatusCode::OK, Json(devices)).into_response(),
        Ok(Err(err)) => {
            warn!(
                trace_id = %err.trace_id,
                code = %err.code,
                error = %err.error,
                "Device enumeration failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
        Err(err) => {
            let err = AppError::system(
                format!("Enumeration task failed: {err}"),
                trace_id.as_str(),
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response()
        }
    }
}
