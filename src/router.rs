use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;

use crate::{AppState, middleware::log_errors, routes};

// 用户相关的路由
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(routes::user::create_user))
        .route("/users/{id}", get(routes::user::get_user))
}

// 关注关系相关的路由
fn follow_routes() -> Router<AppState> {
    Router::new()
        .route("/follows", post(routes::follow::follow_user))
        .route(
            "/users/{id}/follows/{relation}",
            get(routes::follow::list_follows),
        )
}

// 推文和时间线相关的路由
fn tweet_routes() -> Router<AppState> {
    Router::new()
        .route("/tweets", post(routes::tweet::create_tweet))
        .route("/users/{id}/tweets", get(routes::tweet::get_user_tweets))
        .route("/users/{id}/timeline", get(routes::timeline::get_timeline))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(routes::health::ping))
        .merge(user_routes())
        .merge(follow_routes())
        .merge(tweet_routes())
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(log_errors)))
        .with_state(state)
}
