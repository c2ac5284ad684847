use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatReply, ChatRequest},
    services::coach::generate_reply,
    state::SharedState,
};

#[instrument(name = "chat", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(payload) = payload.inspect_err(|rejection| {
        warn!(status = %rejection.status(), "rejected chat payload");
    })?;

    let Some(client) = state.provider.get_client() else {
        error!("no upstream credential configured");
        return Err(AppError::Configuration);
    };

    let reply = generate_reply(client.as_ref(), &payload.message)
        .await
        .inspect_err(|e| error!(error = %e, "upstream call failed"))?;

    info!(message_len = payload.message.len(), reply_len = reply.len(), "chat reply sent");
    Ok(Json(ChatReply { reply }))
}
