// 时间线读取路径
// 关注关系 + 推文 + 用户在读取时联表计算，结果按页缓存

mod cache;
mod model;
mod service;
mod store;

use thiserror::Error;

pub use cache::{
    CacheError, CacheLookup, DisabledCache, KeyValueCache, PageCache, RedisCache, TtlPolicy,
    timeline_key,
};
pub use model::{TimelineItem, TimelinePage, TimelineWithCount};
pub use service::TimelineService;
pub use store::{PgTimelineStore, TimelineStore};

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("user {0} not found")]
    UserNotFound(i64),
    #[error("timeline store error: {0}")]
    Store(#[from] sqlx::Error),
    #[error("timeline task failed: {0}")]
    Task(String),
}
