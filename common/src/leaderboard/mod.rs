mod client;
mod entry;
mod error;
mod grpc;

pub use client::{LeaderboardClient, ScoreBoard};
pub use entry::{validate_player_name, HighScoreEntry, MAX_NAME_LENGTH};
pub use error::LeaderboardError;
pub use grpc::GrpcScoreBoard;
