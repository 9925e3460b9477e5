use std::net::SocketAddr;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use common::leaderboard::HighScoreEntry;
use common::log;

use crate::score_store::ScoreStore;

#[derive(Clone)]
pub struct WebServerState {
    pub store: ScoreStore,
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoreBody {
    pub name: String,
    pub score: u64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

pub fn router(store: ScoreStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/high-scores", get(get_high_scores))
        .route("/api/scores", post(submit_score))
        .layer(cors)
        .with_state(WebServerState { store })
}

pub async fn run_web_server(store: ScoreStore, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log!("Web server listening on {}", addr);
    axum::serve(listener, router(store)).await
}

async fn get_high_scores(State(state): State<WebServerState>) -> Json<Vec<HighScoreEntry>> {
    Json(state.store.high_scores().await)
}

async fn submit_score(
    State(state): State<WebServerState>,
    Json(body): Json<SubmitScoreBody>,
) -> Response {
    match state.store.add_score(&body.name, body.score).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            log!("Rejected HTTP score submission: {}", error);
            (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WebServerState {
        WebServerState {
            store: ScoreStore::new(10),
        }
    }

    #[tokio::test]
    async fn test_submit_then_list() {
        let state = state();
        let response = submit_score(
            State(state.clone()),
            Json(SubmitScoreBody {
                name: "Alice".to_string(),
                score: 50,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let Json(scores) = get_high_scores(State(state)).await;
        assert_eq!(scores, vec![HighScoreEntry::new("Alice", 50)]);
    }

    #[tokio::test]
    async fn test_empty_name_is_bad_request() {
        let state = state();
        let response = submit_score(
            State(state.clone()),
            Json(SubmitScoreBody {
                name: String::new(),
                score: 50,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let Json(scores) = get_high_scores(State(state)).await;
        assert!(scores.is_empty());
    }
}
