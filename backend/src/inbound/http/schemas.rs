//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of `utoipa` derives. The wrappers here mirror their
//! wire shape and register under the domain type's name.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-issued identifier.
    #[schema(example = 1, minimum = 1)]
    id: i64,
    /// Display name.
    #[schema(example = "Ivan Ivanov")]
    name: String,
    /// Unique email address.
    #[schema(example = "i.i.ivanov@mail.com")]
    email: String,
}
