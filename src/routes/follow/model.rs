use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use crate::common::Pagination;
use crate::routes::user::User;

const FOLLOWS_CACHE_PREFIX: &str = "follows:";

#[derive(Debug, Error)]
pub enum FollowError {
    #[error("Cannot follow yourself")]
    SelfFollow,
    #[error("Invalid follower or followed ID")]
    InvalidId,
    #[error("Invalid follow type '{0}'. Must be 'followers' or 'following'")]
    InvalidRelation(String),
    #[error("Nonexistent follower ID user")]
    NonexistentFollowerUser,
    #[error("Nonexistent followed ID user")]
    NonexistentFollowedUser,
    #[error("Already following this user")]
    AlreadyFollowing,
    #[error("follow store error: {0}")]
    Store(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Follow {
    pub follower_id: i64,
    pub followed_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFollowRequest {
    pub follower_id: i64,
    pub followed_id: i64,
}

/// 关注列表中的一项
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FollowInfo {
    #[sqlx(flatten)]
    pub user: User,
    pub follow_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// 关注该用户的人
    Followers,
    /// 该用户关注的人
    Following,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Followers => "followers",
            Relation::Following => "following",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = FollowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "followers" => Ok(Relation::Followers),
            "following" => Ok(Relation::Following),
            other => Err(FollowError::InvalidRelation(other.to_string())),
        }
    }
}

/// 自己关注自己的检查放在最前面，与用户是否存在无关
pub fn validate_edge(follower_id: i64, followed_id: i64) -> Result<(), FollowError> {
    if follower_id == followed_id {
        return Err(FollowError::SelfFollow);
    }
    if follower_id <= 0 || followed_id <= 0 {
        return Err(FollowError::InvalidId);
    }
    Ok(())
}

pub fn follows_key(user_id: i64, relation: Relation, page: Pagination) -> String {
    format!(
        "{}{}:{}:{}:{}",
        FOLLOWS_CACHE_PREFIX, user_id, relation, page.limit, page.offset
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_follow_is_rejected_before_anything_else() {
        assert!(matches!(validate_edge(5, 5), Err(FollowError::SelfFollow)));
        // 即使ID本身非法，也先报自己关注自己
        assert!(matches!(validate_edge(0, 0), Err(FollowError::SelfFollow)));
        assert!(matches!(validate_edge(-1, -1), Err(FollowError::SelfFollow)));
    }

    #[test]
    fn non_positive_ids_are_invalid() {
        assert!(matches!(validate_edge(0, 3), Err(FollowError::InvalidId)));
        assert!(matches!(validate_edge(3, -2), Err(FollowError::InvalidId)));
        assert!(validate_edge(1, 2).is_ok());
    }

    #[test]
    fn parses_relation() {
        assert_eq!("followers".parse::<Relation>().unwrap(), Relation::Followers);
        assert_eq!("following".parse::<Relation>().unwrap(), Relation::Following);
        assert!(matches!(
            "friends".parse::<Relation>(),
            Err(FollowError::InvalidRelation(ref r)) if r == "friends"
        ));
    }

    #[test]
    fn follows_key_includes_relation_and_page() {
        let key = follows_key(8, Relation::Following, Pagination::new(25, 50));
        assert_eq!(key, "follows:8:following:25:50");
    }
}
