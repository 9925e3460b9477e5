use eframe::egui;
use tokio::sync::mpsc;
use common::games::snake::{Direction, SnakeFrame};

use crate::state::ClientCommand;

pub const PIXELS_PER_CELL: f32 = 20.0;

const BACKGROUND_COLOR: egui::Color32 = egui::Color32::from_rgb(0x1e, 0x1e, 0x1e);
const HEAD_COLOR: egui::Color32 = egui::Color32::from_rgb(0x45, 0xa0, 0x49);
const BODY_COLOR: egui::Color32 = egui::Color32::from_rgb(0x4c, 0xaf, 0x50);
const FOOD_COLOR: egui::Color32 = egui::Color32::from_rgb(0xff, 0xd7, 0x00);

/// Draws the running game and forwards steering keys to the client task.
pub fn render_game(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    frame: Option<&SnakeFrame>,
    command_tx: &mpsc::UnboundedSender<ClientCommand>,
) {
    send_turns(ctx, command_tx);

    let Some(frame) = frame else {
        ui.label("Starting...");
        return;
    };

    ui.heading(format!("Score: {}", frame.score));
    ui.label(format!("Speed: {}ms per move", frame.tick_interval.as_millis()));
    ui.separator();

    render_field(ui, frame);

    ctx.request_repaint_after(frame.tick_interval / 2);
}

fn direction_for_key(key: egui::Key) -> Option<Direction> {
    match key {
        egui::Key::ArrowUp | egui::Key::W => Some(Direction::Up),
        egui::Key::ArrowDown | egui::Key::S => Some(Direction::Down),
        egui::Key::ArrowLeft | egui::Key::A => Some(Direction::Left),
        egui::Key::ArrowRight | egui::Key::D => Some(Direction::Right),
        _ => None,
    }
}

// Every press goes out in the order it was typed; the game decides what to ignore.
fn send_turns(ctx: &egui::Context, command_tx: &mpsc::UnboundedSender<ClientCommand>) {
    let directions: Vec<Direction> = ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key { key, pressed: true, repeat: false, .. } => direction_for_key(*key),
                _ => None,
            })
            .collect()
    });

    for direction in directions {
        let _ = command_tx.send(ClientCommand::Turn(direction));
    }
}

pub fn render_field(ui: &mut egui::Ui, frame: &SnakeFrame) {
    let canvas_size = egui::vec2(
        frame.field_size.width as f32 * PIXELS_PER_CELL,
        frame.field_size.height as f32 * PIXELS_PER_CELL,
    );
    let (response, painter) = ui.allocate_painter(canvas_size, egui::Sense::hover());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 0.0, BACKGROUND_COLOR);

    for (index, segment) in frame.body.iter().enumerate() {
        let min = origin + egui::vec2(
            segment.x as f32 * PIXELS_PER_CELL,
            segment.y as f32 * PIXELS_PER_CELL,
        );
        let cell = egui::Rect::from_min_size(
            min,
            egui::vec2(PIXELS_PER_CELL - 2.0, PIXELS_PER_CELL - 2.0),
        );
        let color = if index == 0 { HEAD_COLOR } else { BODY_COLOR };
        painter.rect_filled(cell, 0.0, color);
    }

    if let Some(food) = frame.food {
        let center = origin + egui::vec2(
            food.x as f32 * PIXELS_PER_CELL + PIXELS_PER_CELL / 2.0,
            food.y as f32 * PIXELS_PER_CELL + PIXELS_PER_CELL / 2.0,
        );
        painter.circle_filled(center, PIXELS_PER_CELL / 2.0 - 2.0, FOOD_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::SessionRng;
    use common::games::snake::{SnakeGameState, SnakeSettings};

    fn press_keys(ctx: &egui::Context, command_tx: &mpsc::UnboundedSender<ClientCommand>, keys: &[egui::Key]) {
        let input = egui::RawInput {
            events: keys
                .iter()
                .map(|key| egui::Event::Key {
                    key: *key,
                    physical_key: None,
                    pressed: true,
                    repeat: false,
                    modifiers: egui::Modifiers::NONE,
                })
                .collect(),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| send_turns(ctx, command_tx));
    }

    fn apply_turns(command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>, state: &mut SnakeGameState) -> usize {
        let mut applied = 0;
        while let Ok(command) = command_rx.try_recv() {
            if let ClientCommand::Turn(direction) = command {
                state.set_direction(direction);
                applied += 1;
            }
        }
        applied
    }

    #[test]
    fn test_keys_map_to_directions() {
        assert_eq!(direction_for_key(egui::Key::ArrowUp), Some(Direction::Up));
        assert_eq!(direction_for_key(egui::Key::S), Some(Direction::Down));
        assert_eq!(direction_for_key(egui::Key::A), Some(Direction::Left));
        assert_eq!(direction_for_key(egui::Key::ArrowRight), Some(Direction::Right));
        assert_eq!(direction_for_key(egui::Key::Space), None);
    }

    #[test]
    fn test_presses_in_one_frame_are_sent_in_order() {
        let ctx = egui::Context::default();
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();

        press_keys(&ctx, &command_tx, &[egui::Key::ArrowUp, egui::Key::ArrowLeft]);

        assert_eq!(command_rx.try_recv().ok(), Some(ClientCommand::Turn(Direction::Up)));
        assert_eq!(command_rx.try_recv().ok(), Some(ClientCommand::Turn(Direction::Left)));
        assert!(command_rx.try_recv().is_err());
    }

    #[test]
    fn test_rejected_turn_can_be_pressed_again_after_tick() {
        let ctx = egui::Context::default();
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();
        let mut rng = SessionRng::new(7);
        let mut state = SnakeGameState::new(SnakeSettings::default(), &mut rng);
        state.start(&mut rng);

        // Left is the reverse of the applied Right, so only Up is staged.
        press_keys(&ctx, &command_tx, &[egui::Key::ArrowUp, egui::Key::ArrowLeft]);
        apply_turns(&mut command_rx, &mut state);
        state.update(&mut rng);
        assert_eq!(state.snake.direction, Direction::Up);

        press_keys(&ctx, &command_tx, &[egui::Key::ArrowLeft]);
        assert_eq!(apply_turns(&mut command_rx, &mut state), 1);
        state.update(&mut rng);
        assert_eq!(state.snake.direction, Direction::Left);
    }

    #[test]
    fn test_repeated_key_is_sent_every_time() {
        let ctx = egui::Context::default();
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();

        press_keys(&ctx, &command_tx, &[egui::Key::W]);
        press_keys(&ctx, &command_tx, &[egui::Key::W]);

        assert_eq!(command_rx.try_recv().ok(), Some(ClientCommand::Turn(Direction::Up)));
        assert_eq!(command_rx.try_recv().ok(), Some(ClientCommand::Turn(Direction::Up)));
    }
}
