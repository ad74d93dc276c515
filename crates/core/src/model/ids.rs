use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest identifier accepted by the document store.
pub const MAX_ID_LEN: usize = 128;

/// Error type for parsing an identifier from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IdError {
    #[error("{kind} cannot be empty")]
    Empty { kind: &'static str },

    #[error("{kind} is longer than {MAX_ID_LEN} bytes")]
    TooLong { kind: &'static str },

    #[error("{kind} cannot contain '/'")]
    Separator { kind: &'static str },
}

fn validate(kind: &'static str, raw: &str) -> Result<(), IdError> {
    if raw.trim().is_empty() {
        return Err(IdError::Empty { kind });
    }
    if raw.len() > MAX_ID_LEN {
        return Err(IdError::TooLong { kind });
    }
    if raw.contains('/') {
        return Err(IdError::Separator { kind });
    }
    Ok(())
}

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier after checking it is a valid document id.
            ///
            /// # Errors
            ///
            /// Returns `IdError` if the value is blank, too long or contains a path separator.
            pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
                let id = id.into();
                validate(stringify!($name), &id)?;
                Ok(Self(id))
            }

            /// Returns the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

document_id!(
    /// Identifier of a course document (`courses/{id}`).
    CourseId
);

document_id!(
    /// Identifier of a module document (`courses/{course}/modul/{id}`).
    ModuleId
);

document_id!(
    /// Identifier of a final-exam entry (`courses/{course}/exam/{id}`).
    ExamEntryId
);

document_id!(
    /// Identifier of a user; matches the uid handed out by the auth provider.
    UserId
);

impl UserId {
    /// Generates a fresh random user id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
