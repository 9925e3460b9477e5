use std::future::Future;

use crate::log;
use super::entry::{validate_player_name, HighScoreEntry};
use super::error::LeaderboardError;

/// The remote high-score store. Ordering and length of the returned list are the store's policy.
pub trait ScoreBoard: Send + Sync + Clone + 'static {
    fn add_score(
        &self,
        name: String,
        score: u64,
    ) -> impl Future<Output = Result<(), LeaderboardError>> + Send;

    fn get_high_scores(&self) -> impl Future<Output = Result<Vec<HighScoreEntry>, LeaderboardError>> + Send;
}

/// Stateless pass-through to a `ScoreBoard` that validates names before anything goes remote.
#[derive(Clone)]
pub struct LeaderboardClient<B: ScoreBoard> {
    board: B,
}

impl<B: ScoreBoard> LeaderboardClient<B> {
    pub fn new(board: B) -> Self {
        Self { board }
    }

    pub async fn submit(&self, name: &str, score: u64) -> Result<(), LeaderboardError> {
        let name = validate_player_name(name)?;
        log!("Submitting score {} for {}", score, name);
        self.board.add_score(name, score).await
    }

    pub async fn fetch_rankings(&self) -> Result<Vec<HighScoreEntry>, LeaderboardError> {
        let scores = self.board.get_high_scores().await?;
        log!("Fetched {} high scores", scores.len());
        Ok(scores)
    }

    /// Game-over flow: store the score, then read back the list to display.
    pub async fn submit_and_refresh(
        &self,
        name: &str,
        score: u64,
    ) -> Result<Vec<HighScoreEntry>, LeaderboardError> {
        self.submit(name, score).await?;
        self.fetch_rankings().await
    }
}
