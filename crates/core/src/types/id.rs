//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use barrio_core::define_id;
/// define_id!(UserId);
/// define_id!(SiteId);
///
/// let user_id = UserId::new(1);
/// let site_id = SiteId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: UserId = site_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CategoryId);
define_id!(SiteId);
define_id!(SiteImageId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::UserId;

    #[test]
    fn test_new_and_as_i64() {
        let id = UserId::new(42);
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn test_display() {
        let id = UserId::new(7);
        assert_eq!(format!("{id}"), "7");
    }

    #[test]
    fn test_from_into() {
        let id: UserId = 99.into();
        let raw: i64 = id.into();
        assert_eq!(raw, 99);
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::new(5);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "5");

        let parsed: UserId = serde_json::from_str("5").unwrap();
        assert_eq!(parsed, id);
    }
}
