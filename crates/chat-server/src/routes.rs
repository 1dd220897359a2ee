//! HTTP routes.
//!
//! Handlers only unpack requests, call the services in [`AppState`],
//! and map the outcome to a status code:
//!
//! | route                      | ok                      | failure              |
//! |----------------------------|-------------------------|----------------------|
//! | `GET  /messages/:room`     | 200 JSON array          | 500 storage          |
//! | `POST /message/:room`      | 200 `Message received`  | 400 missing, 500     |
//! | `POST /typing`             | 200 empty               | 400 missing          |
//! | `GET  /typing-status?room=`| 200 `{typingUser}`/`{}` | -                    |

use axum::extract::{Path, Query, Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chat_core::ChatError;
use chat_protocol::{
    MessageView, PostMessageBody, TypingBody, TypingStatusQuery, TypingStatusView,
};
use tracing::{debug, error, warn};

use crate::types::AppState;

pub const ACK_BODY: &str = "Message received";
pub const MISSING_DATA_BODY: &str = "Missing data";
const STORAGE_FAILURE_BODY: &str = "Failed to store message";

/// Build the router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/messages/:room", get(get_messages))
        .route("/message/:room", post(post_message))
        .route("/typing", post(post_typing))
        .route("/typing-status", get(typing_status))
        .layer(middleware::from_fn(allow_any_origin))
        .with_state(state)
}

/// Browser pollers may be served from another origin; answer
/// preflights and tag every response as readable from anywhere.
async fn allow_any_origin(req: Request, next: Next) -> Response {
    let mut resp = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = resp.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    resp
}

/// Edge-level failure, already stripped of internal detail.
#[derive(Debug)]
enum ApiError {
    MissingData,
    Storage,
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Validation(field) => {
                debug!(field, "rejected request");
                ApiError::MissingData
            }
            ChatError::Storage(detail) => {
                error!(%detail, "storage failure");
                ApiError::Storage
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingData => (StatusCode::BAD_REQUEST, MISSING_DATA_BODY).into_response(),
            ApiError::Storage => {
                (StatusCode::INTERNAL_SERVER_ERROR, STORAGE_FAILURE_BODY).into_response()
            }
        }
    }
}

async fn get_messages(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<Json<Vec<MessageView>>, ApiError> {
    debug!(room = %room, "fetching messages");
    let messages = state.rooms.get_messages(&room).await?;
    Ok(Json(messages.into_iter().map(MessageView::from).collect()))
}

async fn post_message(
    State(state): State<AppState>,
    Path(room): Path<String>,
    body: Option<Json<PostMessageBody>>,
) -> Result<&'static str, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let (Some(text), Some(user_id)) = (present(body.message), present(body.user_id)) else {
        warn!(room = %room, "missing data in POST /message");
        return Err(ApiError::MissingData);
    };

    state
        .rooms
        .post_message(&room, &user_id, &text, body.fingerprint.as_deref())
        .await?;

    Ok(ACK_BODY)
}

async fn post_typing(
    State(state): State<AppState>,
    body: Option<Json<TypingBody>>,
) -> Result<StatusCode, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let (Some(room), Some(user_id)) = (present(body.room), present(body.user_id)) else {
        return Err(ApiError::MissingData);
    };

    state.typing.notify_typing(&room, &user_id)?;
    Ok(StatusCode::OK)
}

async fn typing_status(
    State(state): State<AppState>,
    Query(query): Query<TypingStatusQuery>,
) -> Json<TypingStatusView> {
    let typing_user = query
        .room
        .as_deref()
        .and_then(|room| state.typing.typing_status(room));
    Json(TypingStatusView { typing_user })
}

/// `Some` only for a non-blank value.
fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}
