use serde::{Deserialize, Serialize};

use crate::proto::Score;
use super::error::LeaderboardError;

pub const MAX_NAME_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

impl From<Score> for HighScoreEntry {
    fn from(score: Score) -> Self {
        Self {
            name: score.name,
            score: score.score,
        }
    }
}

impl From<HighScoreEntry> for Score {
    fn from(entry: HighScoreEntry) -> Self {
        Score {
            name: entry.name,
            score: entry.score,
        }
    }
}

/// Trims surrounding whitespace and checks the result is a usable display name.
pub fn validate_player_name(name: &str) -> Result<String, LeaderboardError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LeaderboardError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(LeaderboardError::NameTooLong { max: MAX_NAME_LENGTH });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(validate_player_name("  Alice ").unwrap(), "Alice");
    }

    #[test]
    fn test_blank_names_are_rejected() {
        assert_eq!(validate_player_name(""), Err(LeaderboardError::EmptyName));
        assert_eq!(validate_player_name(" \t "), Err(LeaderboardError::EmptyName));
    }

    #[test]
    fn test_long_names_are_rejected() {
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            validate_player_name(&name),
            Err(LeaderboardError::NameTooLong { max: MAX_NAME_LENGTH })
        );
        assert!(validate_player_name(&"é".repeat(MAX_NAME_LENGTH)).is_ok());
    }
}
