use std::sync::Arc;

use super::model::{
    CreateFollowRequest, Follow, FollowError, FollowInfo, Relation, follows_key, validate_edge,
};
use super::store::FollowStore;
use crate::common::Pagination;
use crate::timeline::{CacheLookup, PageCache};

#[derive(Clone)]
pub struct FollowService {
    store: Arc<dyn FollowStore>,
    cache: PageCache,
}

impl FollowService {
    pub fn new(store: Arc<dyn FollowStore>, cache: PageCache) -> Self {
        Self { store, cache }
    }

    pub async fn create(&self, req: CreateFollowRequest) -> Result<Follow, FollowError> {
        validate_edge(req.follower_id, req.followed_id)?;

        // 两个用户都不存在时报被关注者不存在
        if !self.store.user_exists(req.followed_id).await? {
            return Err(FollowError::NonexistentFollowedUser);
        }
        if !self.store.user_exists(req.follower_id).await? {
            return Err(FollowError::NonexistentFollowerUser);
        }

        match self
            .store
            .insert_edge(req.follower_id, req.followed_id)
            .await?
        {
            Some(follow) => {
                tracing::info!(
                    "User {} followed user {}",
                    follow.follower_id,
                    follow.followed_id
                );
                Ok(follow)
            }
            None => Err(FollowError::AlreadyFollowing),
        }
    }

    pub async fn list(
        &self,
        user_id: i64,
        relation: Relation,
        page: Pagination,
    ) -> Result<Vec<FollowInfo>, FollowError> {
        let cache_key = follows_key(user_id, relation, page);

        if let CacheLookup::Fresh(follows) = self.cache.lookup::<FollowInfo>(&cache_key).await {
            return Ok(follows);
        }

        let fetched = self.store.fetch_follows(user_id, relation, page).await?;
        self.cache.store(&cache_key, &fetched).await;

        Ok(fetched.into_items())
    }

    pub async fn count(&self, user_id: i64, relation: Relation) -> Result<i64, FollowError> {
        Ok(self.store.count_follows(user_id, relation).await?)
    }
}
