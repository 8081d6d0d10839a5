use std::sync::Arc;

use futures_util::future::join;

use super::cache::{CacheLookup, PageCache, timeline_key};
use super::model::{TimelineItem, TimelineWithCount};
use super::store::TimelineStore;
use super::TimelineError;
use crate::common::Pagination;

/// 时间线组装服务：缓存查找、回源查询、写回缓存
#[derive(Clone)]
pub struct TimelineService {
    store: Arc<dyn TimelineStore>,
    cache: PageCache,
}

impl TimelineService {
    pub fn new(store: Arc<dyn TimelineStore>, cache: PageCache) -> Self {
        Self { store, cache }
    }

    pub async fn get_timeline(
        &self,
        subject_id: i64,
        page: Pagination,
    ) -> Result<Vec<TimelineItem>, TimelineError> {
        // 用户不存在时直接返回，不读写缓存
        if !self.store.user_exists(subject_id).await? {
            return Err(TimelineError::UserNotFound(subject_id));
        }

        let cache_key = timeline_key(subject_id, page);

        match self.cache.lookup::<TimelineItem>(&cache_key).await {
            CacheLookup::Fresh(items) => return Ok(items),
            CacheLookup::Stale | CacheLookup::Miss => {}
        }

        let fetched = self
            .store
            .fetch_page(subject_id, page)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch timeline for user {}: {}", subject_id, e);
                TimelineError::Store(e)
            })?;

        // 缓存写入失败不影响返回
        self.cache.store(&cache_key, &fetched).await;

        Ok(fetched.into_items())
    }

    pub async fn count_timeline(&self, subject_id: i64) -> Result<i64, TimelineError> {
        Ok(self.store.count_timeline(subject_id).await?)
    }

    /// 并发获取分页数据和总数
    ///
    /// 两个任务都会跑完再返回。分页失败则整体失败；只有计数失败时
    /// 仍然返回分页结果，总数记为 0。
    pub async fn get_timeline_with_count(
        &self,
        subject_id: i64,
        page: Pagination,
    ) -> Result<TimelineWithCount, TimelineError> {
        let page_task = {
            let service = self.clone();
            tokio::spawn(async move { service.get_timeline(subject_id, page).await })
        };
        let count_task = {
            let service = self.clone();
            tokio::spawn(async move { service.count_timeline(subject_id).await })
        };

        let (page_result, count_result) = join(page_task, count_task).await;

        let items = page_result.map_err(|e| TimelineError::Task(e.to_string()))??;

        let count = match count_result {
            Ok(Ok(count)) => count,
            Ok(Err(e)) => {
                tracing::warn!("Failed to count timeline for user {}: {}", subject_id, e);
                0
            }
            Err(e) => {
                tracing::warn!("Timeline count task for user {} failed: {}", subject_id, e);
                0
            }
        };

        Ok(TimelineWithCount { items, count })
    }
}
