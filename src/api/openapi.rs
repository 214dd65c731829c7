//! OpenAPI specification assembly.
//!
//! Collects all utoipa-documented routes into one spec, served at
//! `/api/docs/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lyceum API",
        description = "Stateless JWT authentication service for a social learning platform.",
        license(name = "MIT")
    ),
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::auth::register,
        crate::api::handlers::auth::login,
        crate::api::handlers::users::me,
        crate::api::handlers::users::list_users,
    ),
    components(schemas(
        crate::api::handlers::health::HealthResponse,
        crate::types::RegisterRequest,
        crate::types::LoginRequest,
        crate::types::TokenResponse,
        crate::types::UserResponse,
        crate::types::Role,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration, login and token refresh"),
        (name = "users", description = "User profiles and account listing"),
        (name = "health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
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

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/docs/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/docs/openapi.json", get(openapi_json))
}

/// Returns the generated OpenAPI specification as JSON.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
