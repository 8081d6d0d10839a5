use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::AppState;
use crate::common::{PageQuery, PagedResponse, Pagination};
use crate::error::AppError;
use crate::timeline::TimelineWithCount;
use crate::utils::{parse_user_id, success_to_api_response};

#[axum::debug_handler]
pub async fn get_timeline(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let subject_id = parse_user_id(&raw_id)
        .ok_or_else(|| AppError::InvalidInput("Invalid follower ID".into()))?;
    let page = Pagination::try_from(&query)?;

    let TimelineWithCount { items, count } = state
        .timeline
        .get_timeline_with_count(subject_id, page)
        .await?;

    Ok((
        StatusCode::OK,
        success_to_api_response(PagedResponse::new(items, count, page)),
    ))
}
