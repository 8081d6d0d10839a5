use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;

use crate::routes::user::User;

/// 推文最大长度，按字符（Unicode 标量值）计算而不是字节
pub const MAX_TWEET_CHARS: usize = 280;

#[derive(Debug, Error)]
pub enum TweetError {
    #[error("Invalid user ID")]
    InvalidId,
    #[error("Tweet content must not be empty")]
    EmptyContent,
    #[error("The content of the tweet must not exceed {max} characters")]
    ContentTooLong { max: usize },
    #[error("Nonexistent user")]
    NonexistentUser,
    #[error("tweet store error: {0}")]
    Store(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tweet {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTweetRequest {
    pub author_id: i64,
    pub content: String,
}

pub fn validate_content(content: &str) -> Result<(), TweetError> {
    if content.trim().is_empty() {
        return Err(TweetError::EmptyContent);
    }
    if content.chars().count() > MAX_TWEET_CHARS {
        return Err(TweetError::ContentTooLong {
            max: MAX_TWEET_CHARS,
        });
    }
    Ok(())
}

impl Tweet {
    pub async fn create(pool: &PgPool, req: CreateTweetRequest) -> Result<Self, TweetError> {
        if req.author_id <= 0 {
            return Err(TweetError::InvalidId);
        }
        validate_content(&req.content)?;

        if !User::exists(pool, req.author_id).await? {
            return Err(TweetError::NonexistentUser);
        }

        let tweet = sqlx::query_as::<_, Tweet>(
            r#"
            INSERT INTO tweets (user_id, content, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id, user_id AS author_id, content, created_at
            "#,
        )
        .bind(req.author_id)
        .bind(&req.content)
        .fetch_one(pool)
        .await?;

        Ok(tweet)
    }

    /// 某个用户自己发的推文，不是时间线
    pub async fn find_by_author(pool: &PgPool, author_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Tweet>(
            r#"
            SELECT id, user_id AS author_id, content, created_at
            FROM tweets
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(pool)
        .await
    }
}
