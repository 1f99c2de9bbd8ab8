//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{analyze, breach, login, me, register, AppState};
use super::middleware::{attach_token_issuer, create_cors_layer};

/// OpenAPI document for the Web API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Authgate API",
        description = "Account authentication with password policy and breach checking"
    ),
    paths(
        super::handlers::auth::register,
        super::handlers::auth::login,
        super::handlers::auth::me,
        super::handlers::password::analyze,
        super::handlers::password::breach,
    ),
    components(schemas(
        crate::web::dto::RegisterRequest,
        crate::web::dto::LoginRequest,
        crate::web::dto::PasswordCheckRequest,
        crate::web::dto::RegisterResponse,
        crate::web::dto::LoginResponse,
        crate::web::dto::MeResponse,
        crate::web::dto::AnalyzeResponse,
        crate::web::dto::BreachReport,
        crate::web::dto::UserInfo,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "password", description = "Password analysis and breach checks")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by protected paths.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me));

    let password_routes = Router::new()
        .route("/analyze", post(analyze))
        .route("/breach", post(breach));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/password", password_routes);

    // Clone the issuer for the middleware closure
    let issuer = app_state.service.token_issuer();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let issuer = issuer.clone();
                    attach_token_issuer(issuer, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router.
pub fn create_swagger_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }

    #[test]
    fn test_openapi_document_lists_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/auth/register"));
        assert!(doc.paths.paths.contains_key("/api/auth/login"));
        assert!(doc.paths.paths.contains_key("/api/password/breach"));
    }
}
