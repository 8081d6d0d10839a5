use async_trait::async_trait;
use sqlx::PgPool;

use super::model::{TimelineItem, TimelinePage};
use crate::common::Pagination;

/// 时间线数据源：用户目录 + 关注关系 + 推文
#[async_trait]
pub trait TimelineStore: Send + Sync {
    async fn user_exists(&self, user_id: i64) -> Result<bool, sqlx::Error>;

    /// 取 `subject_id` 关注的所有人发布的推文，按时间倒序，id 倒序兜底
    async fn fetch_page(
        &self,
        subject_id: i64,
        page: Pagination,
    ) -> Result<TimelinePage<TimelineItem>, sqlx::Error>;

    async fn count_timeline(&self, subject_id: i64) -> Result<i64, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgTimelineStore {
    pool: PgPool,
}

impl PgTimelineStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimelineStore for PgTimelineStore {
    async fn user_exists(&self, user_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn fetch_page(
        &self,
        subject_id: i64,
        page: Pagination,
    ) -> Result<TimelinePage<TimelineItem>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TimelineItem>(
            r#"
            SELECT
                t.id AS tweet_id,
                t.user_id AS author_id,
                u.name AS author_name,
                t.content,
                t.created_at
            FROM tweets t
            JOIN follows f ON f.followed_id = t.user_id
            JOIN users u ON u.id = t.user_id
            WHERE f.follower_id = $1
            ORDER BY t.created_at DESC, t.id DESC
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(subject_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(TimelinePage::from_rows(rows, page.limit))
    }

    async fn count_timeline(&self, subject_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM tweets t
            JOIN follows f ON f.followed_id = t.user_id
            JOIN users u ON u.id = t.user_id
            WHERE f.follower_id = $1
            "#,
        )
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await
    }
}
