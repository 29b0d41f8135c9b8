//! # Boards

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::{BoardSecrets, Secret};

/// Visual skin selector for a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    Default,
    Wood,
    Notebook,
    Cork,
}

impl Default for Skin {
    fn default() -> Self {
        Self::Default
    }
}

impl Skin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Default => "default",
            Skin::Wood => "wood",
            Skin::Notebook => "notebook",
            Skin::Cork => "cork",
        }
    }
}

impl FromStr for Skin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Skin::Default),
            "wood" => Ok(Skin::Wood),
            "notebook" => Ok(Skin::Notebook),
            "cork" => Ok(Skin::Cork),
            other => Err(format!(
                "skin must be one of default, wood, notebook, cork (got '{}')",
                other
            )),
        }
    }
}

impl fmt::Display for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A board: the root of a journal document
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    /// Unique board identifier
    pub id: Uuid,

    pub title: String,

    pub description: String,

    pub skin: Skin,

    /// Write capability (never serialized)
    #[serde(skip_serializing)]
    pub edit_secret: Secret,

    /// Read capability
    pub public_secret: Secret,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create a board with freshly generated secrets
    pub fn new(title: String, description: String, skin: Skin) -> Self {
        let secrets = BoardSecrets::generate();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            skin,
            edit_secret: secrets.edit,
            public_secret: secrets.public,
            created_at: now,
            updated_at: now,
        }
    }

    /// Both secrets, for the access gate
    pub fn secrets(&self) -> BoardSecrets {
        BoardSecrets {
            edit: self.edit_secret,
            public: self.public_secret,
        }
    }

    /// Mark the board as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_has_distinct_secrets() {
        let board = Board::new("Trip".into(), String::new(), Skin::Cork);
        assert!(!board.edit_secret.ct_eq(&board.public_secret));
        assert_eq!(board.created_at, board.updated_at);
    }

    #[test]
    fn test_skin_parse() {
        assert_eq!("wood".parse::<Skin>().unwrap(), Skin::Wood);
        assert_eq!(Skin::default(), Skin::Default);
        assert!("plaid".parse::<Skin>().is_err());
    }

    #[test]
    fn test_serialization_omits_edit_secret() {
        let board = Board::new("Trip".into(), String::new(), Skin::Default);
        let json = serde_json::to_string(&board).unwrap();

        assert!(!json.contains("edit_secret"));
        assert!(!json.contains(&board.edit_secret.to_string()));
        assert!(json.contains(&board.public_secret.to_string()));
    }
}
