//! UUID-backed identifiers for the recruitment aggregates.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raised when an identifier string is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID")]
pub struct InvalidIdError {
    kind: &'static str,
}

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its canonical string form.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidIdError> {
                let raw = raw.as_ref();
                if raw.trim() != raw {
                    return Err(InvalidIdError { kind: $kind });
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| InvalidIdError { kind: $kind })
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_uuid_id!(
    /// Identifier of a user account of any role.
    UserId => "user id"
);
define_uuid_id!(
    /// Identifier of a course offering.
    CourseId => "course id"
);
define_uuid_id!(
    /// Identifier of a candidate application.
    ApplicationId => "application id"
);
define_uuid_id!(
    /// Identifier of an academic credential on a candidate profile.
    CredentialId => "credential id"
);
define_uuid_id!(
    /// Identifier of a previous role on a candidate profile.
    PreviousRoleId => "previous role id"
);
