#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use timeline_backend::common::Pagination;
use timeline_backend::routes::follow::{Follow, FollowInfo, FollowStore, Relation};
use timeline_backend::routes::user::User;
use timeline_backend::timeline::{
    CacheError, KeyValueCache, TimelineItem, TimelinePage, TimelineStore,
};

#[derive(Default)]
struct StoreState {
    users: HashMap<i64, String>,
    follows: HashSet<(i64, i64)>,
    tweets: Vec<TimelineItem>,
    next_tweet_id: i64,
}

/// 内存中的时间线数据源
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
    pub fetch_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_count: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: i64, name: &str) {
        self.state.lock().unwrap().users.insert(id, name.to_string());
    }

    pub fn follow(&self, follower_id: i64, followed_id: i64) {
        self.state
            .lock()
            .unwrap()
            .follows
            .insert((follower_id, followed_id));
    }

    pub fn post(&self, author_id: i64, content: &str, created_at: DateTime<Utc>) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_tweet_id += 1;
        let tweet_id = state.next_tweet_id;
        let author_name = state.users.get(&author_id).cloned().unwrap_or_default();
        state.tweets.push(TimelineItem {
            tweet_id,
            author_id,
            author_name,
            content: content.to_string(),
            created_at,
        });
        tweet_id
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn visible(&self, subject_id: i64) -> Vec<TimelineItem> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<TimelineItem> = state
            .tweets
            .iter()
            .filter(|t| state.follows.contains(&(subject_id, t.author_id)))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.tweet_id.cmp(&a.tweet_id))
        });
        items
    }
}

#[async_trait]
impl TimelineStore for MemoryStore {
    async fn user_exists(&self, user_id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.state.lock().unwrap().users.contains_key(&user_id))
    }

    async fn fetch_page(
        &self,
        subject_id: i64,
        page: Pagination,
    ) -> Result<TimelinePage<TimelineItem>, sqlx::Error> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }

        let rows = self
            .visible(subject_id)
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok(TimelinePage::from_rows(rows, page.limit))
    }

    async fn count_timeline(&self, subject_id: i64) -> Result<i64, sqlx::Error> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_count.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("count query failed".into()));
        }
        Ok(self.visible(subject_id).len() as i64)
    }
}

#[derive(Default)]
struct GraphState {
    users: HashMap<i64, User>,
    edges: Vec<Follow>,
}

/// 内存中的关注关系
#[derive(Default)]
pub struct MemoryFollowStore {
    state: Mutex<GraphState>,
    pub lookups: AtomicUsize,
    pub inserts: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl MemoryFollowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: i64, name: &str) {
        self.state.lock().unwrap().users.insert(
            id,
            User {
                id,
                name: name.to_string(),
                email: format!("{name}@example.com"),
                created_at: Utc::now(),
            },
        );
    }

    pub fn connect(&self, follower_id: i64, followed_id: i64, created_at: DateTime<Utc>) {
        self.state.lock().unwrap().edges.push(Follow {
            follower_id,
            followed_id,
            created_at,
        });
    }

    pub fn edges(&self) -> usize {
        self.state.lock().unwrap().edges.len()
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn related(&self, user_id: i64, relation: Relation) -> Vec<FollowInfo> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<FollowInfo> = state
            .edges
            .iter()
            .filter_map(|e| {
                let other = match relation {
                    Relation::Followers if e.followed_id == user_id => e.follower_id,
                    Relation::Following if e.follower_id == user_id => e.followed_id,
                    _ => return None,
                };
                state.users.get(&other).map(|user| FollowInfo {
                    user: user.clone(),
                    follow_date: e.created_at,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            b.follow_date
                .cmp(&a.follow_date)
                .then(b.user.id.cmp(&a.user.id))
        });
        rows
    }
}

#[async_trait]
impl FollowStore for MemoryFollowStore {
    async fn user_exists(&self, user_id: i64) -> Result<bool, sqlx::Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.lock().unwrap().users.contains_key(&user_id))
    }

    async fn insert_edge(
        &self,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<Option<Follow>, sqlx::Error> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if state
            .edges
            .iter()
            .any(|e| e.follower_id == follower_id && e.followed_id == followed_id)
        {
            return Ok(None);
        }
        let follow = Follow {
            follower_id,
            followed_id,
            created_at: Utc::now(),
        };
        state.edges.push(follow.clone());
        Ok(Some(follow))
    }

    async fn fetch_follows(
        &self,
        user_id: i64,
        relation: Relation,
        page: Pagination,
    ) -> Result<TimelinePage<FollowInfo>, sqlx::Error> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self
            .related(user_id, relation)
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok(TimelinePage::from_rows(rows, page.limit))
    }

    async fn count_follows(&self, user_id: i64, relation: Relation) -> Result<i64, sqlx::Error> {
        Ok(self.related(user_id, relation).len() as i64)
    }
}

/// 记录所有读写的内存缓存
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, (Vec<u8>, Duration)>>,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn page_of(&self, key: &str) -> Option<TimelinePage<TimelineItem>> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(bytes, _)| serde_json::from_slice(bytes).unwrap())
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueCache for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, ttl));
        Ok(())
    }
}

/// 模拟 Redis 不可用
pub struct UnreachableCache;

#[async_trait]
impl KeyValueCache for UnreachableCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }
}

pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - chrono::Duration::minutes(minutes)
}
