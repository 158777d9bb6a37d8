//! School boards a request can target.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown board name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown board: {0}")]
pub struct BoardError(pub String);

/// The school board a student studies under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "board", rename_all = "lowercase")
)]
pub enum Board {
    #[serde(rename = "CBSE")]
    Cbse,
    #[serde(rename = "ICSE")]
    Icse,
    State,
}

impl Board {
    /// Display label matching what parents pick in the posting form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cbse => "CBSE",
            Self::Icse => "ICSE",
            Self::State => "State",
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cbse" => Ok(Self::Cbse),
            "icse" => Ok(Self::Icse),
            "state" => Ok(Self::State),
            _ => Err(BoardError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_labels() {
        assert_eq!(serde_json::to_string(&Board::Cbse).unwrap(), "\"CBSE\"");
        assert_eq!(serde_json::to_string(&Board::State).unwrap(), "\"State\"");
        let back: Board = serde_json::from_str("\"ICSE\"").unwrap();
        assert_eq!(back, Board::Icse);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("CBSE".parse::<Board>().unwrap(), Board::Cbse);
        assert_eq!("state".parse::<Board>().unwrap(), Board::State);
        assert!("IB".parse::<Board>().is_err());
    }
}
