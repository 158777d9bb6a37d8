//! Cities served by the marketplace.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown city name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown city: {0}")]
pub struct CityError(pub String);

/// A city the marketplace operates in.
///
/// The service launched in three Uttar Pradesh cities; extending coverage
/// is a code change by design, since localities, seed data, and marketing
/// are curated per city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "city", rename_all = "lowercase")
)]
pub enum City {
    Kanpur,
    Lucknow,
    Unnao,
}

impl City {
    /// All cities currently served, in launch order.
    pub const ALL: [Self; 3] = [Self::Kanpur, Self::Lucknow, Self::Unnao];

    /// Human-readable city name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Kanpur => "Kanpur",
            Self::Lucknow => "Lucknow",
            Self::Unnao => "Unnao",
        }
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for City {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kanpur" => Ok(Self::Kanpur),
            "lucknow" => Ok(Self::Lucknow),
            "unnao" => Ok(Self::Unnao),
            _ => Err(CityError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("Kanpur".parse::<City>().unwrap(), City::Kanpur);
        assert_eq!("lucknow".parse::<City>().unwrap(), City::Lucknow);
        assert_eq!("UNNAO".parse::<City>().unwrap(), City::Unnao);
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("Delhi".parse::<City>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for city in City::ALL {
            assert_eq!(city.to_string().parse::<City>().unwrap(), city);
        }
    }

    #[test]
    fn test_serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&City::Kanpur).unwrap(), "\"Kanpur\"");
        let back: City = serde_json::from_str("\"Lucknow\"").unwrap();
        assert_eq!(back, City::Lucknow);
    }
}
