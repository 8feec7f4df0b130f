//! Diesel row structs for the `users` table.
//!
//! Internal to the persistence adapter; repositories convert them into domain
//! types before returning.

use diesel::prelude::*;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Insertable struct for creating new user records. The id comes from the
/// table's sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}
