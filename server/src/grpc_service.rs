use tonic::{Request, Response, Status};
use common::{
    leaderboard_server::Leaderboard,
    log,
    AddScoreRequest, AddScoreResponse, GetHighScoresRequest, GetHighScoresResponse, Score,
};

use crate::score_store::ScoreStore;

#[derive(Debug)]
pub struct LeaderboardServiceImpl {
    store: ScoreStore,
}

impl LeaderboardServiceImpl {
    pub fn new(store: ScoreStore) -> Self {
        Self { store }
    }
}

#[tonic::async_trait]
impl Leaderboard for LeaderboardServiceImpl {
    async fn add_score(
        &self,
        request: Request<AddScoreRequest>,
    ) -> Result<Response<AddScoreResponse>, Status> {
        let AddScoreRequest { name, score } = request.into_inner();

        self.store.add_score(&name, score).await.map_err(|e| {
            log!("Rejected score submission: {}", e);
            Status::invalid_argument(e)
        })?;

        Ok(Response::new(AddScoreResponse {}))
    }

    async fn get_high_scores(
        &self,
        _request: Request<GetHighScoresRequest>,
    ) -> Result<Response<GetHighScoresResponse>, Status> {
        let scores: Vec<Score> = self
            .store
            .high_scores()
            .await
            .into_iter()
            .map(Score::from)
            .collect();

        Ok(Response::new(GetHighScoresResponse { scores }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::leaderboard::{GrpcScoreBoard, HighScoreEntry, LeaderboardClient, LeaderboardError, ScoreBoard};
    use common::leaderboard_server::LeaderboardServer;
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::transport::Server;

    async fn spawn_server(store: ScoreStore) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            Server::builder()
                .add_service(LeaderboardServer::new(LeaderboardServiceImpl::new(store)))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_submit_then_fetch_round_trip() {
        let address = spawn_server(ScoreStore::new(10)).await;
        let client = LeaderboardClient::new(GrpcScoreBoard::connect_lazy(&address).unwrap());

        client.submit("Alice", 50).await.unwrap();
        let rankings = client.fetch_rankings().await.unwrap();

        assert!(rankings.contains(&HighScoreEntry::new("Alice", 50)));
    }

    #[tokio::test]
    async fn test_rankings_are_ordered_by_store() {
        let address = spawn_server(ScoreStore::new(10)).await;
        let client = LeaderboardClient::new(GrpcScoreBoard::connect_lazy(&address).unwrap());

        client.submit("Bob", 20).await.unwrap();
        let rankings = client.submit_and_refresh("Carol", 80).await.unwrap();

        assert_eq!(
            rankings,
            vec![HighScoreEntry::new("Carol", 80), HighScoreEntry::new("Bob", 20)]
        );
    }

    #[tokio::test]
    async fn test_score_below_full_table_is_acknowledged_but_not_listed() {
        let address = spawn_server(ScoreStore::new(2)).await;
        let client = LeaderboardClient::new(GrpcScoreBoard::connect_lazy(&address).unwrap());

        client.submit("Bob", 90).await.unwrap();
        client.submit("Carol", 50).await.unwrap();
        let rankings = client.submit_and_refresh("Alice", 50).await.unwrap();

        assert_eq!(
            rankings,
            vec![HighScoreEntry::new("Bob", 90), HighScoreEntry::new("Carol", 50)]
        );
    }

    #[tokio::test]
    async fn test_blank_name_sent_directly_is_invalid_argument() {
        let store = ScoreStore::new(10);
        let address = spawn_server(store.clone()).await;
        let board = GrpcScoreBoard::connect_lazy(&address).unwrap();

        let result = board.add_score("  ".to_string(), 10).await;

        match result {
            Err(LeaderboardError::Remote(message)) => assert!(message.contains("InvalidArgument")),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(store.high_scores().await.is_empty());
    }
}
