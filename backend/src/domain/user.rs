//! User data model.
//!
//! Email is the natural key of a user: lookups and deletions address users by
//! email, while the integer id is issued by the store when the user is created.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NonPositiveId { value: i64 },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId { value } => {
                write!(f, "user id must be a positive integer, got {value}")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-issued user identifier.
///
/// Serialises as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use user_api::domain::UserId;
    ///
    /// assert_eq!(UserId::new(7).map(UserId::get), Ok(7));
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::NonPositiveId { value });
        }
        Ok(Self(value))
    }

    /// Access the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-form user name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Wrap a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

/// Email address used as the user's unique key.
///
/// Two addresses are equal only when their strings are identical; no case
/// folding or trimming is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Wrap an email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` is positive and never reused by the store that issued it.
/// - No two users held by one store share an `email`.
///
/// Serialises as `{"id": 1, "name": "...", "email": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
}

impl User {
    /// Build a user from validated components.
    #[must_use]
    pub fn new(id: UserId, name: UserName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Store-issued identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// User name.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Unique email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// A user that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: UserName,
    email: EmailAddress,
}

impl NewUser {
    /// Pair a name with an email address.
    #[must_use]
    pub fn new(name: UserName, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Convenience constructor from borrowed strings.
    ///
    /// # Examples
    /// ```
    /// use user_api::domain::NewUser;
    ///
    /// let user = NewUser::from_parts("Ivan Ivanov", "i.i.ivanov@mail.com");
    /// assert_eq!(user.email().as_ref(), "i.i.ivanov@mail.com");
    /// ```
    pub fn from_parts(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(UserName::new(name), EmailAddress::new(email))
    }

    /// Name to store.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Email to store.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Attach a store-issued id, producing the stored [`User`].
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for user model invariants and JSON shape.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn user_id_rejects_non_positive_values(#[case] value: i64) {
        assert_eq!(
            UserId::new(value),
            Err(UserValidationError::NonPositiveId { value })
        );
    }

    #[rstest]
    fn user_serialises_with_id_name_email() {
        let user = NewUser::from_parts("Ivan Ivanov", "i.i.ivanov@mail.com")
            .into_user(UserId::new(1).expect("valid id"));

        let value = serde_json::to_value(&user).expect("serialise user");
        assert_eq!(
            value,
            json!({ "id": 1, "name": "Ivan Ivanov", "email": "i.i.ivanov@mail.com" })
        );
    }

    #[rstest]
    fn user_id_serialises_as_bare_integer() {
        let id = UserId::new(42).expect("valid id");
        assert_eq!(serde_json::to_string(&id).expect("serialise id"), "42");
    }

    #[rstest]
    fn user_deserialisation_rejects_zero_id() {
        let result = serde_json::from_value::<User>(json!({
            "id": 0,
            "name": "Nobody",
            "email": "nobody@mail.com",
        }));
        assert!(result.is_err());
    }

    #[rstest]
    fn email_comparison_is_case_sensitive() {
        assert_ne!(
            EmailAddress::new("A@mail.com"),
            EmailAddress::new("a@mail.com")
        );
    }
}
