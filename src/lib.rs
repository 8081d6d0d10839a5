use std::sync::Arc;

use config::Config;
use routes::follow::{FollowService, PgFollowStore};
use sqlx::PgPool;
use timeline::{KeyValueCache, PageCache, PgTimelineStore, TimelineService, TtlPolicy};

pub mod common;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod timeline;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub timeline: TimelineService,
    pub follows: FollowService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config, cache: Arc<dyn KeyValueCache>) -> Self {
        let ttl = TtlPolicy {
            full: config.full_page_ttl(),
            partial: config.partial_page_ttl(),
        };
        let page_cache = PageCache::new(cache, ttl);
        let timeline = TimelineService::new(
            Arc::new(PgTimelineStore::new(pool.clone())),
            page_cache.clone(),
        );
        let follows = FollowService::new(Arc::new(PgFollowStore::new(pool.clone())), page_cache);

        Self {
            pool,
            config,
            timeline,
            follows,
        }
    }
}
