use async_trait::async_trait;
use sqlx::PgPool;

use super::model::{Follow, FollowInfo, Relation};
use crate::common::Pagination;
use crate::timeline::TimelinePage;

/// 关注关系数据源
#[async_trait]
pub trait FollowStore: Send + Sync {
    async fn user_exists(&self, user_id: i64) -> Result<bool, sqlx::Error>;

    /// 关系已存在时返回 `None`
    async fn insert_edge(
        &self,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<Option<Follow>, sqlx::Error>;

    async fn fetch_follows(
        &self,
        user_id: i64,
        relation: Relation,
        page: Pagination,
    ) -> Result<TimelinePage<FollowInfo>, sqlx::Error>;

    async fn count_follows(&self, user_id: i64, relation: Relation) -> Result<i64, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgFollowStore {
    pool: PgPool,
}

impl PgFollowStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowStore for PgFollowStore {
    async fn user_exists(&self, user_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn insert_edge(
        &self,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<Option<Follow>, sqlx::Error> {
        sqlx::query_as::<_, Follow>(
            r#"
            INSERT INTO follows (follower_id, followed_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            RETURNING follower_id, followed_id, created_at
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn fetch_follows(
        &self,
        user_id: i64,
        relation: Relation,
        page: Pagination,
    ) -> Result<TimelinePage<FollowInfo>, sqlx::Error> {
        let query = match relation {
            Relation::Followers => {
                r#"
                SELECT u.id, u.name, u.email, u.created_at, f.created_at AS follow_date
                FROM users u
                JOIN follows f ON u.id = f.follower_id
                WHERE f.followed_id = $1
                ORDER BY f.created_at DESC, u.id DESC
                LIMIT $2
                OFFSET $3
                "#
            }
            Relation::Following => {
                r#"
                SELECT u.id, u.name, u.email, u.created_at, f.created_at AS follow_date
                FROM users u
                JOIN follows f ON u.id = f.followed_id
                WHERE f.follower_id = $1
                ORDER BY f.created_at DESC, u.id DESC
                LIMIT $2
                OFFSET $3
                "#
            }
        };

        let rows = sqlx::query_as::<_, FollowInfo>(query)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(TimelinePage::from_rows(rows, page.limit))
    }

    async fn count_follows(&self, user_id: i64, relation: Relation) -> Result<i64, sqlx::Error> {
        let query = match relation {
            Relation::Followers => "SELECT COUNT(*) FROM follows WHERE followed_id = $1",
            Relation::Following => "SELECT COUNT(*) FROM follows WHERE follower_id = $1",
        };

        sqlx::query_scalar::<_, i64>(query)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }
}
