//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `email` carries a unique constraint.
    users (id) {
        /// Primary key issued by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Free-form user name.
        name -> Varchar,
        /// Unique email address.
        email -> Varchar,
    }
}
