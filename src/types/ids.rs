//! Strongly-typed numeric identifiers.
//!
//! All values are validated at construction time, so a `BookshelfId` held
//! anywhere past the validator is known to be positive.

use serde::Serialize;
use std::fmt;

/// Macro to define a validated `u64` newtype.
///
/// Generates: struct, `new()`, `get()`, Display, Serialize.
/// The `positive` flag rejects zero; `non_negative` accepts it.
macro_rules! define_id {
    (@struct $name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
    ($name:ident, positive) => {
        define_id!(@struct $name);

        impl $name {
            pub fn new(value: u64) -> Result<Self, &'static str> {
                if value == 0 {
                    return Err(concat!(stringify!($name), " must be positive"));
                }
                Ok(Self(value))
            }
        }
    };
    ($name:ident, non_negative) => {
        define_id!(@struct $name);

        impl $name {
            pub fn new(value: u64) -> Result<Self, &'static str> {
                Ok(Self(value))
            }
        }
    };
}

define_id!(BookshelfId, positive);
define_id!(BookId, positive);
define_id!(GoalId, positive);
define_id!(GoalTarget, positive);
define_id!(GoalProgress, non_negative);
