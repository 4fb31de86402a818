//! User data model.
//!
//! A [`User`] is a persisted person record identified by a store-generated
//! integer id. The pair (last name, first name) is unique across all stored
//! users; [`NewUser`] is the validated create command and [`UserExample`]
//! the probe used for example matching.

use std::fmt;
use std::str::FromStr;

/// Validation errors returned while building user values from raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// `lastName` was absent or null.
    #[error("lastName must not be null")]
    MissingLastName,
    /// `firstName` was absent or null.
    #[error("firstName must not be null")]
    MissingFirstName,
    /// The identifier could not be parsed as an integer.
    #[error("user id must be an integer")]
    InvalidId,
}

/// Store-generated user identifier.
///
/// # Examples
/// ```
/// use user_registry::domain::UserId;
///
/// let id: UserId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// A persisted user.
///
/// Only repository adapters construct this type, after the store has
/// assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    last_name: String,
    first_name: String,
}

impl User {
    /// Build a user from persisted parts.
    pub fn new(id: UserId, last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            id,
            last_name: last_name.into(),
            first_name: first_name.into(),
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }
}

/// Validated create command for a user that has not been stored yet.
///
/// ## Invariants
/// - Both names are present. Empty strings are accepted; only absence is
///   rejected.
///
/// # Examples
/// ```
/// use user_registry::domain::{NewUser, UserValidationError};
///
/// let user = NewUser::try_from_parts(Some("Doe".into()), Some("Joe".into())).unwrap();
/// assert_eq!(user.last_name(), "Doe");
///
/// let err = NewUser::try_from_parts(None, Some("Joe".into())).unwrap_err();
/// assert_eq!(err, UserValidationError::MissingLastName);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    last_name: String,
    first_name: String,
}

impl NewUser {
    /// Build a create command from names that are known to be present.
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
        }
    }

    /// Validate optional inputs, rejecting absent fields.
    pub fn try_from_parts(
        last_name: Option<String>,
        first_name: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let last_name = last_name.ok_or(UserValidationError::MissingLastName)?;
        let first_name = first_name.ok_or(UserValidationError::MissingFirstName)?;
        Ok(Self::new(last_name, first_name))
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Attach a store-assigned id, producing the persisted form.
    pub fn with_id(self, id: UserId) -> User {
        User::new(id, self.last_name, self.first_name)
    }
}

/// Example-matching probe: `None` fields match any stored value.
///
/// Ids never take part in a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserExample {
    /// Required family name, if any.
    pub last_name: Option<String>,
    /// Required given name, if any.
    pub first_name: Option<String>,
}

impl UserExample {
    /// Return `true` when every populated field equals the user's value.
    pub fn matches(&self, user: &User) -> bool {
        let last_ok = self
            .last_name
            .as_deref()
            .is_none_or(|last| last == user.last_name());
        let first_ok = self
            .first_name
            .as_deref()
            .is_none_or(|first| first == user.first_name());
        last_ok && first_ok
    }
}

impl From<&NewUser> for UserExample {
    fn from(value: &NewUser) -> Self {
        Self {
            last_name: Some(value.last_name.clone()),
            first_name: Some(value.first_name.clone()),
        }
    }
}
