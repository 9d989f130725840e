//! Store-assigned numeric identifiers.

use thiserror::Error;

/// Reasons an identifier could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceIdError {
    #[error("identifier must be a base-10 integer")]
    NotANumber,
    #[error("identifier must be positive")]
    NotPositive,
}

macro_rules! define_resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(raw: i64) -> Result<Self, $crate::domain::ResourceIdError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err($crate::domain::ResourceIdError::NotPositive)
                }
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = $crate::domain::ResourceIdError;

            fn try_from(raw: i64) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::ResourceIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: i64 = s
                    .parse()
                    .map_err(|_| $crate::domain::ResourceIdError::NotANumber)?;
                Self::new(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_resource_id! {
    /// Identifier of a stored user.
    UserId
}

define_resource_id! {
    /// Identifier of a stored product.
    ProductId
}
