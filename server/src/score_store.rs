use std::sync::Arc;
use tokio::sync::Mutex;
use common::leaderboard::{validate_player_name, HighScoreEntry};
use common::log;

/// In-memory high-score table shared by the gRPC and HTTP front ends.
///
/// Entries are kept sorted by score, highest first; equal scores keep submission order.
/// Only the best `max_entries` are retained.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    entries: Arc<Mutex<Vec<HighScoreEntry>>>,
    max_entries: usize,
}

impl ScoreStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            max_entries,
        }
    }

    pub async fn add_score(&self, name: &str, score: u64) -> Result<(), String> {
        let name = validate_player_name(name).map_err(|e| e.to_string())?;

        let mut entries = self.entries.lock().await;
        let position = entries.partition_point(|entry| entry.score >= score);
        if position >= self.max_entries {
            log!("Score {} from {} did not make the top {}", score, name, self.max_entries);
            return Ok(());
        }

        log!("Recording score {} for {} at rank {}", score, name, position + 1);
        entries.insert(position, HighScoreEntry { name, score });
        entries.truncate(self.max_entries);
        Ok(())
    }

    pub async fn high_scores(&self) -> Vec<HighScoreEntry> {
        self.entries.lock().await.clone()
    }
}
