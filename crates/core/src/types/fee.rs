//! Per-class tuition fee.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Fee`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    /// The amount is negative.
    #[error("fee cannot be negative (got {0})")]
    Negative(Decimal),
    /// The amount is implausibly large.
    #[error("fee exceeds the maximum of \u{20b9}{max} per class")]
    TooLarge {
        /// Maximum accepted amount.
        max: Decimal,
    },
}

/// A per-class tuition fee in rupees.
///
/// Decimal, not float: fees are money, and tutors do quote amounts like
/// 249.50. Stored as `NUMERIC` in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Fee(Decimal);

impl Fee {
    /// Largest fee the platform accepts per class.
    pub const MAX_RUPEES: i64 = 100_000;

    /// Create a fee, validating that it is non-negative and plausible.
    ///
    /// # Errors
    ///
    /// Returns a [`FeeError`] for negative or absurdly large amounts.
    pub fn new(amount: Decimal) -> Result<Self, FeeError> {
        if amount.is_sign_negative() {
            return Err(FeeError::Negative(amount));
        }
        let max = Decimal::from(Self::MAX_RUPEES);
        if amount > max {
            return Err(FeeError::TooLarge { max });
        }
        Ok(Self(amount))
    }

    /// Create a fee from whole rupees.
    ///
    /// # Errors
    ///
    /// Returns a [`FeeError`] for negative or absurdly large amounts.
    pub fn from_rupees(rupees: i64) -> Result<Self, FeeError> {
        Self::new(Decimal::from(rupees))
    }

    /// The amount in rupees.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Fee {
    type Error = FeeError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fee> for Decimal {
    fn from(fee: Fee) -> Self {
        fee.0
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{20b9}{}", self.0)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Fee {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Fee {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Fee {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fee() {
        let fee = Fee::from_rupees(500).unwrap();
        assert_eq!(fee.amount(), Decimal::from(500));
        assert_eq!(fee.to_string(), "\u{20b9}500");
    }

    #[test]
    fn test_fractional_fee() {
        let fee = Fee::new(Decimal::new(24950, 2)).unwrap();
        assert_eq!(fee.to_string(), "\u{20b9}249.50");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Fee::from_rupees(-1),
            Err(FeeError::Negative(_))
        ));
    }

    #[test]
    fn test_too_large_rejected() {
        assert!(matches!(
            Fee::from_rupees(100_001),
            Err(FeeError::TooLarge { .. })
        ));
        assert!(Fee::from_rupees(100_000).is_ok());
    }

    #[test]
    fn test_serde_validates() {
        let fee: Fee = serde_json::from_str("\"350\"").unwrap();
        assert_eq!(fee, Fee::from_rupees(350).unwrap());
        assert!(serde_json::from_str::<Fee>("\"-5\"").is_err());
    }
}
