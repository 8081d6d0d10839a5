use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::model::{CreateTweetRequest, Tweet};
use crate::AppState;
use crate::error::AppError;
use crate::routes::user::User;
use crate::utils::{parse_user_id, success_to_api_response};

#[axum::debug_handler]
pub async fn create_tweet(
    State(state): State<AppState>,
    Json(req): Json<CreateTweetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tweet = Tweet::create(&state.pool, req).await?;
    Ok((StatusCode::CREATED, success_to_api_response(tweet)))
}

#[axum::debug_handler]
pub async fn get_user_tweets(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let author_id =
        parse_user_id(&raw_id).ok_or_else(|| AppError::InvalidInput("Invalid user ID".into()))?;

    if !User::exists(&state.pool, author_id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }

    let tweets = Tweet::find_by_author(&state.pool, author_id).await?;
    Ok((StatusCode::OK, success_to_api_response(tweets)))
}
