//! WebSocket events endpoint.
//!
//! The streaming transport cannot set custom headers, so the same bearer
//! token ordinary requests carry in the Authorization header is accepted
//! here as a query parameter. Validation is identical and happens before
//! the upgrade completes.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use prosite_auth::claims::IdentityClaims;
use prosite_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the WebSocket upgrade.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// The bearer token, passed as a query parameter. Absence is a
    /// credential failure, not a malformed request.
    pub token: Option<String>,
}

/// GET /ws?token={jwt}, WebSocket upgrade.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before the upgrade; an invalid token never opens a socket.
    let token = query
        .token
        .as_deref()
        .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;
    let claims = state.jwt_decoder.decode(token)?;

    Ok(ws.on_upgrade(move |socket| handle_connection(state, claims.identity, socket)))
}

/// Handles an established WebSocket connection: forwards hub events the
/// caller's claims allow it to see, until either side closes.
async fn handle_connection(state: AppState, identity: IdentityClaims, socket: WebSocket) {
    let conn_id = Uuid::new_v4();
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut events = state.event_hub.subscribe();

    info!(
        conn_id = %conn_id,
        user_id = %identity.sub,
        "WebSocket connection established"
    );

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if !event.visible_to(&identity, &state.scope_gate) {
                        continue;
                    }
                    let Ok(text) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if ws_tx.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(conn_id = %conn_id, skipped, "WebSocket subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            msg = ws_rx.next() => match msg {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            },
        }
    }

    info!(
        conn_id = %conn_id,
        user_id = %identity.sub,
        "WebSocket connection closed"
    );
}
