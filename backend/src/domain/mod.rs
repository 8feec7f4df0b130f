//! Domain primitives, ports and services.
//!
//! Purpose: define the user model and the use-cases over it without any
//! knowledge of HTTP or SQL. Adapters under `inbound` and `outbound` depend on
//! this module, never the other way round.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failures.
//! - User, NewUser, UserId, UserName, EmailAddress: the user model.
//! - UserDirectoryService: the use-cases behind the HTTP handlers.
//! - TraceId: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;
pub mod user_seeding;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, NewUser, User, UserId, UserName, UserValidationError};
pub use self::user_directory_service::{
    DUPLICATE_EMAIL_MESSAGE, USER_NOT_FOUND_MESSAGE, UserDirectoryService,
};
pub use self::user_seeding::{SeedOutcome, default_seed_users, seed_users};
