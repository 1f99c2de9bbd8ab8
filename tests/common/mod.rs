//! Test helpers for Web API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::extract::Path;
use axum::routing::get;
use axum::Router;
use axum_test::TestServer;
use tokio::net::TcpListener;

use authgate::config::{AuthConfig, BreachConfig, Config};
use authgate::web::handlers::AppState;
use authgate::web::router::{create_health_router, create_router};
use authgate::{AuthService, Database};

/// Configuration with fast hashing parameters and no breach oracle.
pub fn test_config() -> Config {
    Config {
        auth: AuthConfig {
            jwt_secret: "test-secret-key-for-testing-only".to_string(),
            argon2_memory_kib: 1024,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            hash_workers: 2,
            ..AuthConfig::default()
        },
        breach: BreachConfig {
            enabled: false,
            ..BreachConfig::default()
        },
        ..Config::default()
    }
}

/// Create a test server with an in-memory database.
pub async fn test_server() -> TestServer {
    test_server_with_config(test_config()).await
}

/// Create a test server from a specific configuration.
pub async fn test_server_with_config(config: Config) -> TestServer {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let service = AuthService::new(&config, &db)
        .await
        .expect("Failed to create auth service");

    let app_state = Arc::new(AppState::new(service));
    let router =
        create_router(app_state, &config.server.cors_origins).merge(create_health_router());

    TestServer::new(router).expect("Failed to create test server")
}

/// Serve a fixed range-response body on a local port and return the base URL
/// to point the breach client at.
pub async fn mock_oracle(body: impl Into<String>) -> String {
    let body = body.into();
    let app = Router::new().route(
        "/range/:prefix",
        get(move |Path(_prefix): Path<String>| async move { body }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/range")
}
