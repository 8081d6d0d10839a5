use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::model::{CreateUserRequest, User};
use crate::AppState;
use crate::error::AppError;
use crate::utils::{parse_user_id, success_to_api_response};

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    match User::create(&state.pool, req).await {
        Ok(user) => Ok((StatusCode::CREATED, success_to_api_response(user))),
        Err(e)
            if e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation()) =>
        {
            Err(AppError::InvalidInput("Email already registered".into()))
        }
        Err(e) => Err(e.into()),
    }
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id =
        parse_user_id(&raw_id).ok_or_else(|| AppError::InvalidInput("Invalid user ID".into()))?;

    match User::find_by_id(&state.pool, user_id).await? {
        Some(user) => Ok((StatusCode::OK, success_to_api_response(user))),
        None => Err(AppError::NotFound("User not found".into())),
    }
}
