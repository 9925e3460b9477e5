use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use eframe::egui;
use common::games::snake::{Direction, EndReason, SnakeFrame};
use common::leaderboard::HighScoreEntry;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    StartGame,
    Turn(Direction),
    ReturnToMenu,
    SubmitScore { name: String },
    ShowHighScores,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Title,
    Playing {
        frame: Option<SnakeFrame>,
    },
    GameOver {
        final_frame: SnakeFrame,
        reason: EndReason,
    },
    HighScores {
        entries: Vec<HighScoreEntry>,
    },
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between the egui thread and the background game task.
#[derive(Clone)]
pub struct SharedState {
    state: Arc<Mutex<AppState>>,
    error: Arc<Mutex<Option<String>>>,
    busy: Arc<Mutex<bool>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::Title)),
            error: Arc::new(Mutex::new(None)),
            busy: Arc::new(Mutex::new(false)),
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn has_context(&self) -> bool {
        lock(&self.context).is_some()
    }

    pub fn set_context(&self, ctx: egui::Context) {
        *lock(&self.context) = Some(ctx);
    }

    fn request_repaint(&self) {
        if let Some(ctx) = lock(&self.context).as_ref() {
            ctx.request_repaint();
        }
    }

    pub fn set_state(&self, state: AppState) {
        *lock(&self.state) = state;
        self.request_repaint();
    }

    pub fn get_state(&self) -> AppState {
        lock(&self.state).clone()
    }

    pub fn update_frame(&self, frame: SnakeFrame) {
        self.set_state(AppState::Playing { frame: Some(frame) });
    }

    pub fn set_error(&self, error: String) {
        *lock(&self.error) = Some(error);
        self.request_repaint();
    }

    pub fn get_error(&self) -> Option<String> {
        lock(&self.error).clone()
    }

    pub fn clear_error(&self) {
        *lock(&self.error) = None;
    }

    pub fn set_busy(&self, busy: bool) {
        *lock(&self.busy) = busy;
        self.request_repaint();
    }

    pub fn is_busy(&self) -> bool {
        *lock(&self.busy)
    }
}
