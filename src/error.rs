use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::routes::follow::FollowError;
use crate::routes::tweet::TweetError;
use crate::timeline::TimelineError;
use crate::utils::{error_codes, error_to_api_response};

/// 对外暴露的错误分类
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, i32) {
        match self {
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            AppError::Conflict(_) => (StatusCode::CONFLICT, error_codes::CONFLICT),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        (status, error_to_api_response::<()>(code, self.to_string())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", e);
        AppError::Internal("Internal server error".into())
    }
}

impl From<TimelineError> for AppError {
    fn from(e: TimelineError) -> Self {
        match e {
            TimelineError::UserNotFound(_) => AppError::NotFound("Nonexistent user".into()),
            TimelineError::Store(e) => AppError::from(e),
            TimelineError::Task(msg) => {
                tracing::error!("Timeline task failed: {}", msg);
                AppError::Internal("Internal server error".into())
            }
        }
    }
}

impl From<FollowError> for AppError {
    fn from(e: FollowError) -> Self {
        match e {
            FollowError::SelfFollow
            | FollowError::InvalidId
            | FollowError::InvalidRelation(_)
            | FollowError::NonexistentFollowerUser
            | FollowError::NonexistentFollowedUser => AppError::InvalidInput(e.to_string()),
            FollowError::AlreadyFollowing => AppError::Conflict(e.to_string()),
            FollowError::Store(e) => AppError::from(e),
        }
    }
}

impl From<TweetError> for AppError {
    fn from(e: TweetError) -> Self {
        match e {
            TweetError::EmptyContent
            | TweetError::ContentTooLong { .. }
            | TweetError::InvalidId
            | TweetError::NonexistentUser => AppError::InvalidInput(e.to_string()),
            TweetError::Store(e) => AppError::from(e),
        }
    }
}
