use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// A value that had to be non-blank was empty or whitespace only
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{what} must not be blank")]
pub struct BlankValue {
    what: &'static str,
}

impl BlankValue {
    pub(crate) const fn new(what: &'static str) -> Self {
        Self { what }
    }

    /// Name of the rejected value (e.g. `error code`)
    pub const fn what(&self) -> &'static str {
        self.what
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

const fn is_blank_ascii(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            return false;
        }
        i += 1;
    }
    true
}

macro_rules! non_blank_text {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Build from a runtime string
            ///
            /// # Errors
            ///
            /// Returns [`BlankValue`] when the value is empty or whitespace only
            pub fn new(value: impl Into<String>) -> Result<Self, BlankValue> {
                let value = value.into();
                if is_blank(&value) {
                    return Err(BlankValue::new($what));
                }
                Ok(Self(Cow::Owned(value)))
            }

            /// Build from a string literal
            ///
            /// Evaluated in a `const` item, a blank literal is a compile error.
            ///
            /// # Panics
            ///
            /// Panics when `value` consists only of ASCII whitespace
            pub const fn from_static(value: &'static str) -> Self {
                assert!(!is_blank_ascii(value), "static text must not be blank");
                Self(Cow::Borrowed(value))
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

        impl TryFrom<&str> for $name {
            type Error = BlankValue;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = BlankValue;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

non_blank_text!(
    /// Stable machine-readable error code, never blank
    ErrorCode,
    "error code"
);

non_blank_text!(
    /// Message catalog key, never blank
    MessageKey,
    "message key"
);
