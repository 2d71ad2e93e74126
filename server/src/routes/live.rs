//! Live like counts over websocket.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade `GET /api/likes/live?id=<articleId>`; a missing id is rejected
//!    before the upgrade.
//! 2. Subscribe to the update channel, then send the current count if the
//!    article has one.
//! 3. Forward every `LikeUpdate` for that article until the client closes.
//!
//! A socket that falls behind the broadcast buffer gets the current count
//! again instead of the skipped updates.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blog_wire::{LikeUpdate, RegisterQuery};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::likes;
use crate::state::AppState;

pub async fn handle_live(
    State(state): State<AppState>,
    Query(query): Query<RegisterQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let Some(article_id) = query.article_id().map(str::to_owned) else {
        return (StatusCode::BAD_REQUEST, "id required").into_response();
    };
    ws.on_upgrade(move |socket| run_live(socket, state, article_id))
}

async fn run_live(mut socket: WebSocket, state: AppState, article_id: String) {
    let conn_id = Uuid::new_v4();

    // Subscribe first so no registration slips between snapshot and stream.
    let mut updates = likes::subscribe(&state);
    if send_current(&mut socket, &state, &article_id).await.is_err() {
        return;
    }

    info!(%conn_id, %article_id, "live: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => match msg {
                Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            update = updates.recv() => match update {
                Ok(update) if update.id == article_id => {
                    if send_update(&mut socket, &update).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(%conn_id, skipped, "live: subscriber lagged; resending current count");
                    if send_current(&mut socket, &state, &article_id).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    info!(%conn_id, %article_id, "live: client disconnected");
}

async fn send_current(socket: &mut WebSocket, state: &AppState, article_id: &str) -> Result<(), axum::Error> {
    match likes::count(state, article_id).await {
        Some(count) => send_update(socket, &LikeUpdate::new(article_id, count)).await,
        None => Ok(()),
    }
}

async fn send_update(socket: &mut WebSocket, update: &LikeUpdate) -> Result<(), axum::Error> {
    let text = match update.encode() {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, id = %update.id, "live: failed to encode update");
            return Ok(());
        }
    };
    socket.send(Message::Text(text.into())).await
}
