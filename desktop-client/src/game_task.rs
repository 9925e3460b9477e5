use tokio::sync::mpsc;
use common::games::SessionRng;
use common::games::snake::{
    run_session, FrameSink, SessionCommand, SessionOutcome, SnakeFrame, SnakeGameState, SnakeSettings,
};
use common::leaderboard::{LeaderboardClient, ScoreBoard};
use common::log;

use crate::config::ClientConfigManager;
use crate::state::{AppState, ClientCommand, SharedState};

#[derive(Clone)]
pub struct UiFrameSink {
    shared_state: SharedState,
}

impl UiFrameSink {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl FrameSink for UiFrameSink {
    async fn draw(&self, frame: SnakeFrame) {
        self.shared_state.update_frame(frame);
    }
}

enum GameExit {
    Finished(SessionOutcome),
    Shutdown,
}

/// Owns every game run and every leaderboard call. The UI only talks to it through `command_rx`.
pub async fn client_task<B: ScoreBoard>(
    shared_state: SharedState,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
    leaderboard: LeaderboardClient<B>,
    config_manager: ClientConfigManager,
    settings: SnakeSettings,
) {
    let mut last_score: Option<u64> = None;

    loop {
        let Some(command) = command_rx.recv().await else {
            break;
        };

        match command {
            ClientCommand::StartGame => {
                shared_state.clear_error();
                match run_game(&shared_state, &mut command_rx, &settings).await {
                    GameExit::Finished(SessionOutcome::Ended { reason, final_frame }) => {
                        last_score = Some(final_frame.score as u64);
                        shared_state.set_state(AppState::GameOver { final_frame, reason });
                    }
                    GameExit::Finished(SessionOutcome::Stopped { .. }) => {
                        last_score = None;
                        shared_state.set_state(AppState::Title);
                    }
                    GameExit::Shutdown => break,
                }
            }

            ClientCommand::ReturnToMenu => {
                shared_state.clear_error();
                shared_state.set_state(AppState::Title);
            }

            ClientCommand::SubmitScore { name } => {
                let Some(score) = last_score else {
                    log!("Ignoring score submission: no finished game");
                    continue;
                };

                shared_state.set_busy(true);
                let result = leaderboard.submit_and_refresh(&name, score).await;
                shared_state.set_busy(false);

                match result {
                    Ok(entries) => {
                        last_score = None;
                        shared_state.clear_error();
                        shared_state.set_state(AppState::HighScores { entries });
                        remember_player_name(&config_manager, &name);
                    }
                    Err(e) => {
                        log!("Score submission failed: {}", e);
                        shared_state.set_error(e.to_string());
                    }
                }
            }

            ClientCommand::ShowHighScores => {
                shared_state.set_busy(true);
                let result = leaderboard.fetch_rankings().await;
                shared_state.set_busy(false);

                match result {
                    Ok(entries) => {
                        shared_state.clear_error();
                        shared_state.set_state(AppState::HighScores { entries });
                    }
                    Err(e) => {
                        log!("Failed to fetch high scores: {}", e);
                        shared_state.set_error(e.to_string());
                    }
                }
            }

            ClientCommand::Turn(_) => {}

            ClientCommand::Disconnect => break,
        }
    }

    log!("Client task finished");
}

async fn run_game(
    shared_state: &SharedState,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    settings: &SnakeSettings,
) -> GameExit {
    let mut rng = SessionRng::from_random();
    log!("Starting game with seed {}", rng.seed());

    let mut state = SnakeGameState::new(settings.clone(), &mut rng);
    state.start(&mut rng);
    shared_state.set_state(AppState::Playing { frame: None });

    let (session_tx, session_rx) = mpsc::unbounded_channel();
    let sink = UiFrameSink::new(shared_state.clone());
    let mut game_handle = tokio::spawn(run_session(state, rng, session_rx, sink));

    let shutdown = loop {
        tokio::select! {
            result = &mut game_handle => {
                return match result {
                    Ok(outcome) => GameExit::Finished(outcome),
                    Err(e) => {
                        log!("Game session task failed: {}", e);
                        shared_state.set_error(format!("Game crashed: {}", e));
                        GameExit::Shutdown
                    }
                };
            }
            command = command_rx.recv() => match command {
                Some(ClientCommand::Turn(direction)) => {
                    let _ = session_tx.send(SessionCommand::Turn(direction));
                }
                Some(ClientCommand::ReturnToMenu) => break false,
                Some(ClientCommand::Disconnect) | None => break true,
                Some(_) => {}
            },
        }
    };

    let _ = session_tx.send(SessionCommand::Stop);
    let outcome = game_handle.await;

    match (shutdown, outcome) {
        (false, Ok(outcome)) => GameExit::Finished(stopped_by_player(outcome)),
        (true, _) | (_, Err(_)) => GameExit::Shutdown,
    }
}

// A collision that lands together with a menu request still counts as a stop.
fn stopped_by_player(outcome: SessionOutcome) -> SessionOutcome {
    match outcome {
        SessionOutcome::Ended { final_frame, .. } => SessionOutcome::Stopped { final_frame },
        stopped @ SessionOutcome::Stopped { .. } => stopped,
    }
}

fn remember_player_name(config_manager: &ClientConfigManager, name: &str) {
    let mut config = match config_manager.get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load config: {}", e);
            return;
        }
    };

    let name = name.trim().to_string();
    if config.player_name.as_deref() == Some(name.as_str()) {
        return;
    }

    config.player_name = Some(name);
    if let Err(e) = config_manager.set_config(&config) {
        log!("Failed to save player name to config: {}", e);
    }
}
