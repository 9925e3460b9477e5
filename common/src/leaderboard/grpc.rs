use tonic::transport::{Channel, Endpoint};

use crate::proto::leaderboard_client::LeaderboardClient as LeaderboardRpcClient;
use crate::proto::{AddScoreRequest, GetHighScoresRequest};
use super::client::ScoreBoard;
use super::entry::HighScoreEntry;
use super::error::LeaderboardError;

/// `ScoreBoard` backed by the leaderboard gRPC service.
///
/// The channel connects on first use, so constructing it never blocks; it must be
/// created inside a tokio runtime.
#[derive(Clone)]
pub struct GrpcScoreBoard {
    address: String,
    client: LeaderboardRpcClient<Channel>,
}

impl GrpcScoreBoard {
    pub fn connect_lazy(address: &str) -> Result<Self, LeaderboardError> {
        let endpoint = Endpoint::from_shared(address.to_string()).map_err(|e| {
            LeaderboardError::Connection(format!("invalid server address {}: {}", address, e))
        })?;

        Ok(Self {
            address: address.to_string(),
            client: LeaderboardRpcClient::new(endpoint.connect_lazy()),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl ScoreBoard for GrpcScoreBoard {
    async fn add_score(&self, name: String, score: u64) -> Result<(), LeaderboardError> {
        let mut client = self.client.clone();
        client.add_score(AddScoreRequest { name, score }).await?;
        Ok(())
    }

    async fn get_high_scores(&self) -> Result<Vec<HighScoreEntry>, LeaderboardError> {
        let mut client = self.client.clone();
        let response = client.get_high_scores(GetHighScoresRequest {}).await?;
        Ok(response
            .into_inner()
            .scores
            .into_iter()
            .map(HighScoreEntry::from)
            .collect())
    }
}
