//! SSE streaming endpoint.
//!
//! GET /api/streams/:topic?token=JWT
//!
//! Topics take the form `member:{uuid}`. Subscribes to the SessionHub for
//! that member and forwards JSON values as SSE events (new_match, new_like,
//! new_mega_like, end_user).
//!
//! Auth strategy: JWT passed as `?token=` query param, falling back to the
//! Authorization header. EventSource can't send custom headers, so browser
//! clients append the token to the URL.

use std::convert::Infallible;

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;

use crate::common::MemberId;
use crate::server::app::AxumAppState;

#[derive(Deserialize)]
pub struct StreamQuery {
    /// JWT token for authentication
    token: Option<String>,
}

/// SSE stream handler.
///
/// Auth: Reads JWT from `?token=` query param, falls back to Authorization header.
/// Topic authorization: a member may only subscribe to their own topic.
pub async fn stream_handler(
    Extension(state): Extension<AxumAppState>,
    Path(topic): Path<String>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>, StatusCode> {
    let member = parse_member_topic(&topic).ok_or(StatusCode::BAD_REQUEST)?;

    let token = query.token.or_else(|| extract_bearer_token(&headers));
    let token = token.ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = state
        .jwt_service
        .verify_token(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    if MemberId::from_uuid(claims.member_id) != member {
        return Err(StatusCode::FORBIDDEN);
    }

    // Subscribe to the member's session channel
    let rx = state.server_deps.session_hub.subscribe(member).await;

    // Stream with connected event and lag handling
    let connected =
        stream::once(async { Ok::<_, Infallible>(Event::default().event("connected").data("ok")) });

    let events = BroadcastStream::new(rx).filter_map(|result| async {
        match result {
            Ok(value) => {
                let event_name = value
                    .get("type")
                    .and_then(|t| t.as_str())
                    .unwrap_or("message");
                Event::default()
                    .event(event_name)
                    .json_data(&value)
                    .ok()
                    .map(Ok)
            }
            Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
                Event::default()
                    .event("lagged")
                    .json_data(&serde_json::json!({"missed": n}))
                    .ok()
                    .map(Ok)
            }
        }
    });

    Ok(Sse::new(connected.chain(events)).keep_alive(KeepAlive::default()))
}

/// Parse a `member:{uuid}` topic into a member id.
fn parse_member_topic(topic: &str) -> Option<MemberId> {
    let raw = topic.strip_prefix("member:")?;
    let uuid = uuid::Uuid::parse_str(raw).ok()?;
    Some(MemberId::from_uuid(uuid))
}

/// Extract Bearer token from Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get("authorization")?.to_str().ok()?;
    auth.strip_prefix("Bearer ").map(|t| t.to_string())
}
