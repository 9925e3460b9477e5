use eframe::egui;
use tokio::sync::mpsc;
use common::games::snake::{EndReason, SnakeFrame};
use common::leaderboard::{HighScoreEntry, MAX_NAME_LENGTH};
use common::log;

use super::game::{render_field, render_game};
use crate::state::{AppState, ClientCommand, SharedState};

pub struct SnakeApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<ClientCommand>,
    name_input: String,
    disconnect_sent: bool,
}

impl SnakeApp {
    pub fn new(
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<ClientCommand>,
        player_name: Option<String>,
    ) -> Self {
        Self {
            shared_state,
            command_tx,
            name_input: player_name.unwrap_or_default(),
            disconnect_sent: false,
        }
    }

    fn send(&self, command: ClientCommand) {
        if let Err(e) = self.command_tx.send(command) {
            log!("Failed to send command to client task: {}", e);
        }
    }

    fn start_game(&self) {
        self.send(ClientCommand::StartGame);
    }

    fn render_title(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading("Snake");
            ui.add_space(10.0);
            ui.label("Use the arrow keys or WASD to steer. Eat the food, avoid your own tail.");
            ui.add_space(30.0);

            if ui.button("Start Game").clicked() {
                self.start_game();
            }

            ui.add_space(10.0);

            let busy = self.shared_state.is_busy();
            if ui.add_enabled(!busy, egui::Button::new("High Scores")).clicked() {
                self.send(ClientCommand::ShowHighScores);
            }
        });
    }

    fn render_playing(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, frame: Option<&SnakeFrame>) {
        ui.horizontal(|ui| {
            if ui.button("Back to Menu").clicked() {
                self.send(ClientCommand::ReturnToMenu);
            }
        });
        ui.separator();

        render_game(ui, ctx, frame, &self.command_tx);
    }

    fn render_game_over(&mut self, ui: &mut egui::Ui, final_frame: &SnakeFrame, reason: EndReason) {
        ui.heading("Game Over");
        ui.label(reason.describe());
        ui.label(format!("Final score: {}", final_frame.score));
        ui.add_space(10.0);

        let busy = self.shared_state.is_busy();

        ui.horizontal(|ui| {
            ui.label("Your name:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.name_input)
                    .char_limit(MAX_NAME_LENGTH)
                    .desired_width(200.0),
            );

            let enter_pressed = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let submit_clicked = ui.add_enabled(!busy, egui::Button::new("Submit")).clicked();

            if submit_clicked || (enter_pressed && !busy) {
                self.send(ClientCommand::SubmitScore {
                    name: self.name_input.clone(),
                });
            }

            if busy {
                ui.spinner();
            }
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui.button("Play Again").clicked() {
                self.start_game();
            }
            if ui.button("Back to Menu").clicked() {
                self.send(ClientCommand::ReturnToMenu);
            }
        });

        ui.separator();
        render_field(ui, final_frame);
    }

    fn render_high_scores(&mut self, ui: &mut egui::Ui, entries: &[HighScoreEntry]) {
        ui.heading("High Scores");
        ui.separator();

        if entries.is_empty() {
            ui.label("No scores yet");
        } else {
            egui::ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                for (index, entry) in entries.iter().enumerate() {
                    ui.label(format!("{}. {}: {}", index + 1, entry.name, entry.score));
                }
            });
        }

        ui.add_space(10.0);
        if ui.button("Back to Menu").clicked() {
            self.send(ClientCommand::ReturnToMenu);
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.disconnect_sent {
            self.disconnect_sent = true;
            self.send(ClientCommand::Disconnect);
        }

        if let Some(error) = self.shared_state.get_error() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.shared_state.clear_error();
                    }
                });
        }

        let current_state = self.shared_state.get_state();

        egui::CentralPanel::default().show(ctx, |ui| match current_state {
            AppState::Title => self.render_title(ui),
            AppState::Playing { frame } => self.render_playing(ui, ctx, frame.as_ref()),
            AppState::GameOver { final_frame, reason } => self.render_game_over(ui, &final_frame, reason),
            AppState::HighScores { entries } => self.render_high_scores(ui, &entries),
        });
    }
}
