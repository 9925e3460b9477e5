use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    EmptyName,
    NameTooLong { max: usize },
    Connection(String),
    Remote(String),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::EmptyName => write!(f, "Player name must not be empty"),
            LeaderboardError::NameTooLong { max } => {
                write!(f, "Player name must be at most {} characters", max)
            }
            LeaderboardError::Connection(message) => {
                write!(f, "Failed to reach leaderboard server: {}", message)
            }
            LeaderboardError::Remote(message) => write!(f, "Leaderboard server error: {}", message),
        }
    }
}

impl std::error::Error for LeaderboardError {}

impl From<tonic::Status> for LeaderboardError {
    fn from(status: tonic::Status) -> Self {
        match status.code() {
            tonic::Code::Unavailable => LeaderboardError::Connection(status.message().to_string()),
            _ => LeaderboardError::Remote(format!("{:?}: {}", status.code(), status.message())),
        }
    }
}
