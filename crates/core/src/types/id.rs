//! Integer identifiers that cannot be mixed up across entities.
//!
//! A `ProductId` is never accepted where a `CustomerId` is expected, even
//! though both are plain integers on the wire and in the database.

/// Declare an `i32` identifier newtype.
///
/// The generated type serializes as a bare number, orders and hashes like
/// the integer, parses from a decimal string and, with the `postgres`
/// feature, maps onto an `INTEGER` column.
///
/// `0` means "no identifier": a JSON client that omits an id or sends a
/// falsy one ends up with an unset value, which stores ignore.
///
/// ```rust
/// # use soleverse_core::define_id;
/// define_id!(ShoeId);
///
/// let shoe: ShoeId = "7".parse().unwrap();
/// assert_eq!(shoe, ShoeId::new(7));
/// assert!(ShoeId::default().is_unset());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type))]
        #[cfg_attr(feature = "postgres", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }

            /// True for the reserved value `0`.
            #[must_use]
            pub const fn is_unset(&self) -> bool {
                self.0 == 0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Catalog products
define_id!(ProductId);
// Shopper accounts registered through signup
define_id!(UserId);
// Server-side checkout customer records
define_id!(CustomerId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_unset() {
        assert!(ProductId::new(0).is_unset());
        assert!(ProductId::default().is_unset());
        assert!(!ProductId::new(3).is_unset());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ProductId::new(4)).unwrap();
        assert_eq!(json, "4");

        let id: CustomerId = serde_json::from_str("12").unwrap();
        assert_eq!(id.as_i32(), 12);
    }

    #[test]
    fn test_parse_and_display() {
        let id: UserId = " 42 ".parse().unwrap();
        assert_eq!(id, UserId::new(42));
        assert_eq!(format!("{id:>4}"), "  42");
        assert!("shoe".parse::<ProductId>().is_err());
    }
}
