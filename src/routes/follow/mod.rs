mod handler;
mod model;
mod service;
mod store;

pub use handler::{follow_user, list_follows};
pub use model::{
    CreateFollowRequest, Follow, FollowError, FollowInfo, Relation, follows_key, validate_edge,
};
pub use service::FollowService;
pub use store::{FollowStore, PgFollowStore};
