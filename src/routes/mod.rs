pub mod follow;
pub mod health;
pub mod timeline;
pub mod tweet;
pub mod user;
