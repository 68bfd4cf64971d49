use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use motd::core::auth::{AuthApiState, AuthService, JwtService, RevocationStore, TokenStore, auth_router};
use motd::core::config::ServerConfig;
use motd::core::db::pool::{DbConfig, create_pool_with_migrations};
use motd::core::db::repositories::{
    PgPostRepository, PgUserRepository, PostRepository, UserRepository,
};
use motd::core::posts::{PostsApiState, PostsCache, posts_router};

#[tokio::main]
async fn main() {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let server_config = ServerConfig::from_env();

    // A missing JWT_SECRET is fatal; there is no fallback secret.
    let jwt = JwtService::from_env().expect("JWT_SECRET environment variable must be set");

    let db_config = DbConfig::from_env().expect("DATABASE_URL environment variable must be set");
    let pool = create_pool_with_migrations(&db_config)
        .await
        .expect("failed to connect to database");

    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let posts: Arc<dyn PostRepository> = Arc::new(PgPostRepository::new(pool));
    let tokens: Arc<dyn TokenStore> = Arc::new(RevocationStore::new());

    let auth_service = AuthService::new(users.clone(), tokens, jwt);

    let app = Router::new()
        .merge(auth_router(AuthApiState {
            auth_service: auth_service.clone(),
        }))
        .merge(posts_router(
            PostsApiState {
                posts,
                users,
                cache: PostsCache::default(),
            },
            auth_service,
        ))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new());

    tracing::info!("MOTD server listening on http://{}", server_config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
