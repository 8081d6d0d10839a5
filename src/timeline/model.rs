use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 时间线中的一条推文，附带作者昵称
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TimelineItem {
    pub tweet_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// 一页查询结果
///
/// `Full` 表示返回条数正好等于 limit，可以直接信任缓存；
/// `Partial` 表示已经到达数据末尾，缓存中的副本可能已经过时。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum TimelinePage<T> {
    Full(Vec<T>),
    Partial(Vec<T>),
}

impl<T> TimelinePage<T> {
    pub fn from_rows(rows: Vec<T>, limit: i64) -> Self {
        if rows.len() as i64 == limit {
            TimelinePage::Full(rows)
        } else {
            TimelinePage::Partial(rows)
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, TimelinePage::Full(_))
    }

    pub fn items(&self) -> &[T] {
        match self {
            TimelinePage::Full(items) | TimelinePage::Partial(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            TimelinePage::Full(items) | TimelinePage::Partial(items) => items,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineWithCount {
    pub items: Vec<TimelineItem>,
    pub count: i64,
}
