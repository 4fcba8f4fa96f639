//! Macro for implementing Display and FromStr for wire enums
//!
//! The API spells enum values in a fixed case (`activationlink`, `fi-FI`).
//! The macro renders that exact spelling and parses it back
//! case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use fuusor_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Locale {
//!     Finnish,
//!     English,
//! }
//!
//! impl_wire_enum_conversions!(Locale {
//!     Finnish => "fi-FI",
//!     English => "en-US",
//! });
//!
//! assert_eq!(Locale::Finnish.to_string(), "fi-FI");
//! assert_eq!("EN-us".parse::<Locale>().unwrap(), Locale::English);
//! ```

/// Implements `Display`, `FromStr` and `as_str` for wire enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire spelling
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire spelling of this value.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
