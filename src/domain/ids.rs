//! Identifiers for lists and tasks.
//!
//! Identifiers are derived from human-readable names by replacing every
//! whitespace character with [`NAME_SEPARATOR`], so `"Grocery List"` becomes
//! `Grocery_List`. Cache keys join identifiers with [`KEY_SEPARATOR`], which
//! therefore must never appear inside an identifier; construction rejects it so
//! that two distinct `(list, task)` pairs can never encode to the same key.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Character substituted for whitespace when deriving an identifier from a name.
pub const NAME_SEPARATOR: char = '_';

/// Character joining identifier segments inside cache keys.
pub const KEY_SEPARATOR: char = ':';

/// Longest identifier accepted, in bytes.
///
/// memcached caps keys at 250 bytes; a task key holds two identifiers plus an
/// 11-byte prefix.
pub const MAX_IDENTIFIER_LEN: usize = 110;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier `{value}` exceeds {max} bytes", max = MAX_IDENTIFIER_LEN)]
    TooLong { value: String },
    #[error("identifier `{value}` contains the reserved character `{sep}`", sep = KEY_SEPARATOR)]
    ReservedCharacter { value: String },
    #[error("identifier `{value}` contains whitespace or control characters")]
    Unprintable { value: String },
}

/// Replace whitespace in `name` with [`NAME_SEPARATOR`].
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_whitespace() {
                NAME_SEPARATOR
            } else {
                ch
            }
        })
        .collect()
}

fn validate(value: &str) -> Result<(), IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong {
            value: value.to_string(),
        });
    }
    if value.contains(KEY_SEPARATOR) {
        return Err(IdentifierError::ReservedCharacter {
            value: value.to_string(),
        });
    }
    if value.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
        return Err(IdentifierError::Unprintable {
            value: value.to_string(),
        });
    }
    Ok(())
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Accept an identifier exactly as given (e.g. from a request path).
            pub fn parse(value: impl Into<String>) -> Result<Self, IdentifierError> {
                let value = value.into();
                validate(&value)?;
                Ok(Self(value))
            }

            /// Derive the identifier from a human-readable name.
            pub fn from_name(name: &str) -> Result<Self, IdentifierError> {
                Self::parse(normalize_name(name))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

identifier!(
    /// Identifier of a task list, unique within the store.
    ListId
);

identifier!(
    /// Identifier of a task, unique within its owning list.
    TaskId
);
