//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character that is not a digit or separator.
    #[error("phone number contains an invalid character: {0:?}")]
    InvalidCharacter(char),
    /// The number does not have exactly ten digits after normalization.
    #[error("phone number must have exactly 10 digits (got {0})")]
    WrongLength(usize),
    /// The number does not start with a valid Indian mobile prefix.
    #[error("phone number must start with 6, 7, 8 or 9")]
    BadPrefix,
}

/// A validated Indian mobile number, stored as its ten-digit form.
///
/// Parsing accepts common separators (spaces, dashes) and an optional
/// `+91` or leading-zero trunk prefix, and normalizes everything down to
/// the bare ten digits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse and normalize a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneError`] if the input is not a plausible Indian
    /// mobile number.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut digits = String::with_capacity(12);
        for (i, c) in s.chars().enumerate() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '(' | ')' => {}
                '+' if i == 0 => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        // Strip country code or trunk prefix
        let normalized = if s.starts_with('+') && digits.len() == 12 && digits.starts_with("91") {
            digits.get(2..).unwrap_or_default()
        } else if digits.len() == 11 && digits.starts_with('0') {
            digits.get(1..).unwrap_or_default()
        } else {
            digits.as_str()
        };

        if normalized.len() != 10 {
            return Err(PhoneError::WrongLength(normalized.len()));
        }

        if !normalized.starts_with(['6', '7', '8', '9']) {
            return Err(PhoneError::BadPrefix);
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the ten-digit number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Phone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_ten_digits() {
        let phone = Phone::parse("8181066459").unwrap();
        assert_eq!(phone.as_str(), "8181066459");
    }

    #[test]
    fn test_parse_with_separators() {
        let phone = Phone::parse("81810 66459").unwrap();
        assert_eq!(phone.as_str(), "8181066459");

        let phone = Phone::parse("81810-66459").unwrap();
        assert_eq!(phone.as_str(), "8181066459");
    }

    #[test]
    fn test_parse_strips_country_code() {
        let phone = Phone::parse("+91 81810 66459").unwrap();
        assert_eq!(phone.as_str(), "8181066459");
    }

    #[test]
    fn test_parse_strips_trunk_zero() {
        let phone = Phone::parse("08181066459").unwrap();
        assert_eq!(phone.as_str(), "8181066459");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert_eq!(
            Phone::parse("81810x6459"),
            Err(PhoneError::InvalidCharacter('x'))
        );
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(Phone::parse("12345"), Err(PhoneError::WrongLength(5)));
        assert_eq!(
            Phone::parse("818106645912"),
            Err(PhoneError::WrongLength(12))
        );
    }

    #[test]
    fn test_parse_bad_prefix() {
        assert_eq!(Phone::parse("1181066459"), Err(PhoneError::BadPrefix));
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("9876543210").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"9876543210\"");
        let back: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phone);
    }
}
