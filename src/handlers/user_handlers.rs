//! HTTP handlers for user operations.

use crate::{
    errors::AppError,
    models::requests::{CreateUserRequest, parse_payload},
    services::recipe_service::RecipeService,
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// POST `/api/users` — create a user.
///
/// Unlike the recipe endpoints this one insists on a JSON content type and
/// answers 415 with the received header and body when it is missing.
pub async fn create_user(
    State(service): State<RecipeService>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    tracing::debug!(?content_type, body_len = body.len(), "create user request");

    if !content_type.is_some_and(is_json_content_type) {
        let received_data = String::from_utf8_lossy(&body);
        return Ok((
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(json!({
                "error": "Content-Type must be application/json",
                "received_content_type": content_type,
                "received_data": received_data,
                "status": StatusCode::UNSUPPORTED_MEDIA_TYPE.as_u16(),
            })),
        )
            .into_response());
    }

    let new_user = parse_payload::<CreateUserRequest>(&body)?
        .unwrap_or_default()
        .validate()?;
    let user = service.create_user(new_user).await?;

    tracing::info!(user_id = user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

/// `application/json`, or any `application/*+json`, ignoring parameters.
fn is_json_content_type(value: &str) -> bool {
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
