//! School class levels and tutor class ranges.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`ClassLevel`] or [`ClassRange`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassRangeError {
    /// The class level is outside 1..=12.
    #[error("class must be between {min} and {max} (got {0})", min = ClassLevel::MIN, max = ClassLevel::MAX)]
    OutOfRange(i64),
    /// The range minimum exceeds the maximum.
    #[error("class range minimum {min} exceeds maximum {max}")]
    Inverted {
        /// Lower bound that was given.
        min: ClassLevel,
        /// Upper bound that was given.
        max: ClassLevel,
    },
    /// The textual form could not be parsed.
    #[error("invalid class range {0:?}, expected \"min-max\"")]
    Malformed(String),
}

/// A school class (standard), 1 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ClassLevel(u8);

impl ClassLevel {
    /// Lowest class taught on the platform.
    pub const MIN: u8 = 1;
    /// Highest class taught on the platform.
    pub const MAX: u8 = 12;

    /// Create a class level, validating the 1..=12 bound.
    ///
    /// # Errors
    ///
    /// Returns [`ClassRangeError::OutOfRange`] for anything outside 1..=12.
    pub const fn new(class: u8) -> Result<Self, ClassRangeError> {
        if class >= Self::MIN && class <= Self::MAX {
            Ok(Self(class))
        } else {
            Err(ClassRangeError::OutOfRange(class as i64))
        }
    }

    /// The class number.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// The class number widened for database storage.
    #[must_use]
    pub const fn as_i16(&self) -> i16 {
        self.0 as i16
    }
}

impl TryFrom<u8> for ClassLevel {
    type Error = ClassRangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i16> for ClassLevel {
    type Error = ClassRangeError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ClassRangeError::OutOfRange(i64::from(value)))
            .and_then(Self::new)
    }
}

impl From<ClassLevel> for u8 {
    fn from(level: ClassLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ClassLevel {
    type Err = ClassRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| ClassRangeError::Malformed(s.to_owned()))?;
        Self::new(n)
    }
}

/// An inclusive range of classes a tutor teaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassRange {
    min: ClassLevel,
    max: ClassLevel,
}

impl ClassRange {
    /// Create a range, validating `min <= max`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassRangeError::Inverted`] if `min > max`.
    pub const fn new(min: ClassLevel, max: ClassLevel) -> Result<Self, ClassRangeError> {
        if min.get() <= max.get() {
            Ok(Self { min, max })
        } else {
            Err(ClassRangeError::Inverted { min, max })
        }
    }

    /// Parse the legacy `"min-max"` string form (e.g. `"3-8"`).
    ///
    /// # Errors
    ///
    /// Returns [`ClassRangeError`] if either bound is missing, out of
    /// range, or inverted.
    pub fn parse(s: &str) -> Result<Self, ClassRangeError> {
        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| ClassRangeError::Malformed(s.to_owned()))?;
        Self::new(min.parse()?, max.parse()?)
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> ClassLevel {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> ClassLevel {
        self.max
    }

    /// Whether `class` falls inside the range, inclusive at both ends.
    #[must_use]
    pub const fn contains(&self, class: ClassLevel) -> bool {
        self.min.get() <= class.get() && class.get() <= self.max.get()
    }
}

impl fmt::Display for ClassRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl std::str::FromStr for ClassRange {
    type Err = ClassRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn level(n: u8) -> ClassLevel {
        ClassLevel::new(n).unwrap()
    }

    #[test]
    fn test_level_bounds() {
        assert!(ClassLevel::new(1).is_ok());
        assert!(ClassLevel::new(12).is_ok());
        assert_eq!(ClassLevel::new(0), Err(ClassRangeError::OutOfRange(0)));
        assert_eq!(ClassLevel::new(13), Err(ClassRangeError::OutOfRange(13)));
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = ClassRange::new(level(3), level(8)).unwrap();
        assert!(range.contains(level(3)));
        assert!(range.contains(level(8)));
        assert!(range.contains(level(5)));
        assert!(!range.contains(level(2)));
        assert!(!range.contains(level(9)));
    }

    #[test]
    fn test_single_class_range() {
        let range = ClassRange::new(level(10), level(10)).unwrap();
        assert!(range.contains(level(10)));
        assert!(!range.contains(level(9)));
        assert!(!range.contains(level(11)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            ClassRange::new(level(9), level(4)),
            Err(ClassRangeError::Inverted { .. })
        ));
    }

    #[test]
    fn test_parse_legacy_form() {
        let range = ClassRange::parse("1-12").unwrap();
        assert_eq!(range.min().get(), 1);
        assert_eq!(range.max().get(), 12);
        assert_eq!(range.to_string(), "1-12");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ClassRange::parse("five").is_err());
        assert!(ClassRange::parse("3").is_err());
        assert!(ClassRange::parse("0-5").is_err());
        assert!(ClassRange::parse("8-3").is_err());
    }

    #[test]
    fn test_serde_level_rejects_out_of_range() {
        let ok: ClassLevel = serde_json::from_str("7").unwrap();
        assert_eq!(ok.get(), 7);
        assert!(serde_json::from_str::<ClassLevel>("0").is_err());
        assert!(serde_json::from_str::<ClassLevel>("13").is_err());
    }
}
