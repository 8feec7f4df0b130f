//! User API handlers.
//!
//! ```text
//! GET    /api/v1/user?email=...   Look up a user by email
//! POST   /api/v1/user             Create a user, returning its id
//! DELETE /api/v1/user?email=...   Remove a user by email
//! ```

use actix_web::{HttpResponse, Scope, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{EmailAddress, NewUser, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorDetail;
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, query_config};

/// Query string selecting a user by email.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Email address of the user.
    #[param(example = "i.i.ivanov@mail.com")]
    pub email: String,
}

/// Request body for `POST /api/v1/user`.
///
/// Example JSON:
/// `{"name":"Ivan Ivanov","email":"i.i.ivanov@mail.com"}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Sidor Sidorov")]
    pub name: String,
    #[schema(example = "s.s.sidorov@mail.com")]
    pub email: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(value: CreateUserRequest) -> Self {
        Self::from_parts(value.name, value.email)
    }
}

/// Mount the user handlers under `/api/v1` with extractor error shaping.
pub fn scope() -> Scope {
    web::scope("/api/v1")
        .app_data(json_config())
        .app_data(query_config())
        .service(get_user)
        .service(create_user)
        .service(delete_user)
}

/// Fetch a user by email.
#[utoipa::path(
    get,
    path = "/api/v1/user",
    params(EmailQuery),
    responses(
        (status = 200, description = "User found", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorDetail),
        (status = 422, description = "Invalid query", body = ErrorDetail),
        (status = 503, description = "Store unavailable", body = ErrorDetail)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user")]
pub async fn get_user(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<User>> {
    let email = EmailAddress::new(query.into_inner().email);
    debug!(%email, "looking up user");
    let user = state.users.find_by_email(&email).await?;
    Ok(web::Json(user))
}

/// Create a user and return its id as a bare integer.
#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = i64, example = json!(3)),
        (status = 409, description = "Email already registered", body = ErrorDetail),
        (status = 422, description = "Invalid request body", body = ErrorDetail),
        (status = 503, description = "Store unavailable", body = ErrorDetail)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let id = state.users.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(id))
}

/// Delete a user by email.
#[utoipa::path(
    delete,
    path = "/api/v1/user",
    params(EmailQuery),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorDetail),
        (status = 422, description = "Invalid query", body = ErrorDetail),
        (status = 503, description = "Store unavailable", body = ErrorDetail)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<HttpResponse> {
    let email = EmailAddress::new(query.into_inner().email);
    state.users.delete_by_email(&email).await?;
    Ok(HttpResponse::NoContent().finish())
}
