use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::errors::AppError;
use crate::services::notifier;
use crate::services::watcher::{WatcherBusy, WatcherCommand};
use crate::telegram::types::Update;
use crate::AppState;

/// Telegram webhook entry point. Routed updates always get a 200 so
/// Telegram does not re-deliver; only a wrong token path is rejected.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    if token != state.config.telegram_bot_token {
        return Err(AppError::NotFound);
    }

    let update: Update = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(format!("malformed update: {e}")))?;

    let Some(message) = update.message else {
        tracing::debug!(update_id = update.update_id, "Ignoring update without message");
        return Ok(StatusCode::OK);
    };
    let chat_id = message.chat.id;
    let text = message.text.as_deref().unwrap_or("").trim();

    let command = match text {
        t if t.starts_with("/start") => WatcherCommand::Summary { chat_id },
        t if t.starts_with("/update") => WatcherCommand::PollNow { chat_id },
        t if t.starts_with('/') => {
            tracing::debug!(chat_id, command = t, "Ignoring unknown command");
            return Ok(StatusCode::OK);
        }
        _ => WatcherCommand::RegisterChat { chat_id },
    };

    if let Err(WatcherBusy) = state.watcher.submit(command) {
        tracing::warn!(chat_id, "Watcher command queue full — asking caller to retry");
        state.telegram.send_message(chat_id, notifier::BUSY).await;
    }

    Ok(StatusCode::OK)
}
