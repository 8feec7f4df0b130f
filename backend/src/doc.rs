//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user endpoints, the health probes, and the schema
//! wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorDetail;
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::users::CreateUserRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        description = "Look up, register and remove users keyed by email address."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserSchema, CreateUserRequest, ErrorDetail)),
    tags(
        (name = "users", description = "User directory operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
