mod game_state;
mod session;
mod settings;
mod entity;
mod types;

pub use game_state::SnakeGameState;
pub use session::{run_session, FrameSink, SessionCommand, SessionOutcome, SnakeFrame};
pub use settings::{SnakeSettings, SpeedSettings};
pub use entity::Snake;
pub use types::{Direction, EndReason, FieldSize, GamePhase, Point, TickOutcome, WallCollisionMode};
