use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use timeline_backend::{
    AppState,
    config::Config,
    middleware::{RateLimiter, rate_limit},
    router::create_router,
    timeline::{DisabledCache, KeyValueCache, RedisCache},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 设置数据库连接池
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'timeline_backend';")
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");

    // 设置 Redis 客户端，连不上时只是不走缓存
    let redis_client = match config.redis_url.as_deref().map(redis::Client::open) {
        Some(Ok(client)) => Some(Arc::new(client)),
        Some(Err(e)) => {
            tracing::warn!("Invalid Redis URL, running without cache: {}", e);
            None
        }
        None => {
            tracing::warn!("REDIS_URL not set, running without cache");
            None
        }
    };

    let cache: Arc<dyn KeyValueCache> = match &redis_client {
        Some(client) => Arc::new(RedisCache::new(client.clone())),
        None => Arc::new(DisabledCache),
    };

    // 设置应用状态
    let state = AppState::new(pool, config.clone(), cache);

    let router = create_router(state.clone());

    // 有 Redis 时才启用限流
    let router = match redis_client {
        Some(client) => {
            let rate_limiter = Arc::new(RateLimiter::new(client, config.clone()));
            router.layer(axum::middleware::from_fn_with_state(rate_limiter, rate_limit))
        }
        None => router,
    };

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
