use super::{
    health::build_health_check_routers, pet_kindergarden::build_pet_kindergarden_routers,
    user::build_user_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_user_routers())
        .merge(build_pet_kindergarden_routers());
    Router::new().nest("/api/v1", router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter::{database::connect_database_with, redis::RedisClient};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use shared::config::{AppConfig, AuthConfig, DatabaseConfig, RedisConfig, ServerConfig};
    use std::sync::Arc;
    use tower::ServiceExt;

    // 接続は遅延させるので DB や Redis がなくても組み立てられる
    fn registry() -> AppRegistry {
        let app_config = AppConfig {
            database: DatabaseConfig {
                host: "localhost".into(),
                port: 5432,
                username: "app".into(),
                password: "passwd".into(),
                database: "app".into(),
            },
            redis: RedisConfig {
                host: "localhost".into(),
                port: 6379,
            },
            auth: AuthConfig { ttl: 3600 },
            server: ServerConfig {
                port: ServerConfig::DEFAULT_PORT,
            },
        };
        let pool = connect_database_with(&app_config.database);
        let redis_client = Arc::new(RedisClient::new(&app_config.redis).unwrap());
        AppRegistry::new(pool, redis_client, app_config)
    }

    #[tokio::test]
    async fn health_check_answers_without_authentication() -> anyhow::Result<()> {
        let app = routes().with_state(registry());
        let res = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty())?)
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn protected_routes_require_a_bearer_token() -> anyhow::Result<()> {
        let app = routes().with_state(registry());
        for uri in [
            "/api/v1/users/me",
            "/api/v1/pet-kindergardens/me",
            "/api/v1/pet-kindergardens/0b7f6c3e-3f5e-4a57-9a43-3c1c7f0f3b11/reservations/calendar?year=2024&month=5",
        ] {
            let res = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty())?)
                .await?;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{uri}");

            let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
            let body: serde_json::Value = serde_json::from_slice(&bytes)?;
            assert_eq!(body["code"], "not_authenticated");
        }
        Ok(())
    }
}
