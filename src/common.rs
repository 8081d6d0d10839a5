use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_LIMIT: i64 = 25;
pub const MAX_LIMIT: i64 = 100;

// 分页参数，构造后保证 0 < limit <= MAX_LIMIT 且 offset >= 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

/// 查询字符串里的原始分页参数，保留为字符串以便返回统一的校验错误
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl Pagination {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    pub fn from_query(limit: Option<&str>, offset: Option<&str>) -> Result<Self, AppError> {
        let limit = match limit.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|l| *l > 0 && *l <= MAX_LIMIT)
                .ok_or_else(|| AppError::InvalidInput("Invalid limit parameter".into()))?,
            None => DEFAULT_LIMIT,
        };

        let offset = match offset.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|o| *o >= 0)
                .ok_or_else(|| AppError::InvalidInput("Invalid offset parameter".into()))?,
            None => 0,
        };

        Ok(Self { limit, offset })
    }
}

impl TryFrom<&PageQuery> for Pagination {
    type Error = AppError;

    fn try_from(query: &PageQuery) -> Result<Self, Self::Error> {
        Pagination::from_query(query.limit.as_deref(), query.offset.as_deref())
    }
}

/// 带总数和翻页链接的列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub count: i64,
    pub limit: i64,
    pub offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, count: i64, page: Pagination) -> Self {
        let next = (page.offset + page.limit < count)
            .then(|| format!("?limit={}&offset={}", page.limit, page.offset + page.limit));
        let previous = (page.offset - page.limit >= 0)
            .then(|| format!("?limit={}&offset={}", page.limit, page.offset - page.limit));

        Self {
            items,
            count,
            limit: page.limit,
            offset: page.offset,
            next,
            previous,
        }
    }
}
