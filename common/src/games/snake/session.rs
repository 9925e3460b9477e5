use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::log;
use crate::games::SessionRng;
use super::game_state::SnakeGameState;
use super::types::{Direction, EndReason, FieldSize, Point, TickOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Stop,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeFrame {
    pub tick: u64,
    pub body: Vec<Point>,
    pub food: Option<Point>,
    pub score: u32,
    pub field_size: FieldSize,
    pub tick_interval: Duration,
}

impl SnakeFrame {
    pub fn capture(state: &SnakeGameState) -> Self {
        Self {
            tick: state.tick,
            body: state.snake.body.iter().copied().collect(),
            food: state.food,
            score: state.score,
            field_size: state.field_size,
            tick_interval: state.tick_interval(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    Ended { reason: EndReason, final_frame: SnakeFrame },
    Stopped { final_frame: SnakeFrame },
}

impl SessionOutcome {
    pub fn final_frame(&self) -> &SnakeFrame {
        match self {
            SessionOutcome::Ended { final_frame, .. } | SessionOutcome::Stopped { final_frame } => {
                final_frame
            }
        }
    }
}

/// Receives one frame per tick. The sink never feeds anything back into the game.
pub trait FrameSink: Send + Sync + Clone + 'static {
    fn draw(&self, frame: SnakeFrame) -> impl Future<Output = ()> + Send;
}

/// Drives a started game until it ends or is stopped.
///
/// Turn commands may arrive at any moment; they are only staged, and the staged
/// direction takes effect at the start of the next tick. A `Stop` command, or the
/// command sender being dropped, returns before any further tick runs.
pub async fn run_session<S: FrameSink>(
    mut state: SnakeGameState,
    mut rng: SessionRng,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    sink: S,
) -> SessionOutcome {
    sink.draw(SnakeFrame::capture(&state)).await;

    loop {
        let sleep = tokio::time::sleep(state.tick_interval());
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => break,
                command = commands.recv() => match command {
                    Some(SessionCommand::Turn(direction)) => state.set_direction(direction),
                    Some(SessionCommand::Stop) | None => {
                        log!("Session stopped at tick {} with score {}", state.tick, state.score);
                        state.return_to_menu();
                        return SessionOutcome::Stopped {
                            final_frame: SnakeFrame::capture(&state),
                        };
                    }
                },
            }
        }

        let outcome = state.update(&mut rng);
        let frame = SnakeFrame::capture(&state);
        sink.draw(frame.clone()).await;

        match outcome {
            TickOutcome::Ended(reason) => {
                return SessionOutcome::Ended {
                    reason,
                    final_frame: frame,
                };
            }
            TickOutcome::Idle => {
                return SessionOutcome::Stopped { final_frame: frame };
            }
            TickOutcome::Moved | TickOutcome::AteFood => {}
        }
    }
}
