use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::model::{CreateFollowRequest, Relation};
use crate::AppState;
use crate::common::{PageQuery, PagedResponse, Pagination};
use crate::error::AppError;
use crate::utils::{parse_user_id, success_to_api_response};

#[axum::debug_handler]
pub async fn follow_user(
    State(state): State<AppState>,
    Json(req): Json<CreateFollowRequest>,
) -> Result<impl IntoResponse, AppError> {
    let follow = state.follows.create(req).await?;
    Ok((StatusCode::CREATED, success_to_api_response(follow)))
}

#[axum::debug_handler]
pub async fn list_follows(
    State(state): State<AppState>,
    Path((raw_id, raw_relation)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user_id =
        parse_user_id(&raw_id).ok_or_else(|| AppError::InvalidInput("Invalid user ID".into()))?;
    let relation = raw_relation.parse::<Relation>()?;
    let page = Pagination::try_from(&query)?;

    let follows = state.follows.list(user_id, relation, page).await?;

    // 计数失败时仍然返回已经拿到的列表
    let count = match state.follows.count(user_id, relation).await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!("Failed to count {} of user {}: {}", relation, user_id, e);
            0
        }
    };

    Ok((
        StatusCode::OK,
        success_to_api_response(PagedResponse::new(follows, count, page)),
    ))
}
