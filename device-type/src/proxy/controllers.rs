use axum::Json;
use axum::extract::State;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::action::to_action_result;
use crate::proxy::models::{InitResponse, RunRequest};
use crate::proxy::state::ProxyState;

/// The action is compiled in, so there is no code to load.
pub async fn init() -> Json<InitResponse> {
    tracing::debug!("init requested");
    Json(InitResponse { ok: true })
}

pub async fn run(State(state): State<ProxyState>, Json(req): Json<RunRequest>) -> Json<Value> {
    let RunRequest {
        value,
        activation_id,
        action_name,
    } = req;
    let activation_id = activation_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let span = tracing::info_span!("activation", %activation_id, action = ?action_name);

    async move {
        let result = state.action().invoke(&value).await;
        match &result {
            Ok(_) => tracing::info!("activation succeeded"),
            Err(e) => tracing::warn!(status_code = ?e.status_code(), "activation failed: {e}"),
        }
        Json(to_action_result(&result))
    }
    .instrument(span)
    .await
}
