//! Record identifiers.
//!
//! Both collections key their records by a UUID. The newtypes keep a user
//! identifier from being handed to a class query, and parse the raw path
//! segment of `{id}` routes into an [`AppError`] when it is malformed.
//!
//! # Example
//!
//! ```ignore
//! use dreamit_models::ids::ClassId;
//!
//! let id = ClassId::from_path("6f1c2b4e-5a43-4cf2-9d5c-0b1e7f2a9c11")?;
//! let bad = ClassId::from_path("64b7f0c2e1");   // Err: invalid identifier
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::PgTypeInfo,
};
use dreamit_core::AppError;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Defines a UUID newtype usable as a sqlx column, a serde value and an
/// OpenAPI string schema.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID.
            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the inner UUID value.
            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Parse a raw `{id}` path segment.
            pub fn from_path(raw: &str) -> Result<Self, AppError> {
                raw.parse::<Self>()
                    .map_err(|_| AppError::invalid_identifier(raw))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        // SQLx Type implementation for Postgres
        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <Uuid as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <Uuid as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        // SQLx Encode implementation
        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        // SQLx Decode implementation
        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        // Serde Deserialize - manual impl for transparent UUID deserialization
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a user record.
    UserId
);

define_id!(
    /// Identifier of a class record.
    ClassId
);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = UserId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_from_path_valid() {
        let id = ClassId::from_path("12345678-1234-1234-1234-123456789abc").unwrap();
        assert_eq!(format!("{}", id), "12345678-1234-1234-1234-123456789abc");
    }

    #[test]
    fn test_from_path_invalid() {
        let err = ClassId::from_path("64b7f0c2e1a9").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "invalid identifier: 64b7f0c2e1a9");
    }

    #[test]
    fn test_id_debug() {
        let id = UserId::from_uuid(Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc));
        let debug = format!("{:?}", id);
        assert!(debug.starts_with("UserId("));
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let json = r#""12345678-1234-1234-1234-123456789abc""#;
        let id: ClassId = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), json);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ClassId::new(), ClassId::new());
    }
}
