//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input contains nothing but whitespace.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than digits and whitespace.
    #[error("phone number may only contain digits (found {0:?})")]
    InvalidCharacter(char),
    /// Fewer digits than allowed.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum number of digits.
        min: usize,
    },
    /// More digits than allowed.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum number of digits.
        max: usize,
    },
}

/// A phone number normalized to its digits.
///
/// ## Constraints
///
/// - Whitespace anywhere in the input is ignored
/// - Everything else must be an ASCII digit
/// - 8-15 digits after whitespace removal
///
/// ## Examples
///
/// ```
/// use tech_bazaar_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("55501000").is_ok());
/// assert!(PhoneNumber::parse("5550 1000").is_ok());   // whitespace stripped
///
/// assert!(PhoneNumber::parse("").is_err());           // empty
/// assert!(PhoneNumber::parse("555-0100").is_err());   // dash is not a digit
/// assert!(PhoneNumber::parse("5550100").is_err());    // 7 digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 8;

    /// Maximum number of digits.
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `PhoneNumber` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input, once whitespace is removed:
    /// - Is empty
    /// - Contains a non-digit character
    /// - Has fewer than 8 or more than 15 digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacter(bad));
        }

        if digits.len() < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }

        if digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(PhoneNumber::parse("55501000").is_ok());
        assert!(PhoneNumber::parse("5353123456").is_ok());
        assert!(PhoneNumber::parse("123456789012345").is_ok());
    }

    #[test]
    fn test_parse_strips_whitespace() {
        let phone = PhoneNumber::parse(" 5550 1000\t").unwrap();
        assert_eq!(phone.as_str(), "55501000");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(PhoneNumber::parse(""), Err(PhoneError::Empty));
        assert_eq!(PhoneNumber::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_dash_rejected() {
        assert_eq!(
            PhoneNumber::parse("555-0100"),
            Err(PhoneError::InvalidCharacter('-'))
        );
    }

    #[test]
    fn test_parse_plus_prefix_rejected() {
        assert!(matches!(
            PhoneNumber::parse("+5355501000"),
            Err(PhoneError::InvalidCharacter('+'))
        ));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            PhoneNumber::parse("5550100"),
            Err(PhoneError::TooShort { min: 8 })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            PhoneNumber::parse("1234567890123456"),
            Err(PhoneError::TooLong { max: 15 })
        ));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert!(matches!(
            PhoneNumber::parse("٥٥٥٠١٠٠٠"),
            Err(PhoneError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_from_str() {
        let phone: PhoneNumber = "5550 1000".parse().unwrap();
        assert_eq!(phone.to_string(), "55501000");
    }
}
