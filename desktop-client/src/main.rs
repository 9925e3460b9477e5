mod config;
mod game_task;
mod state;
mod ui;

use clap::Parser;
use eframe::egui;
use tokio::sync::mpsc;
use common::leaderboard::{GrpcScoreBoard, LeaderboardClient};
use common::{log, logger};

use game_task::client_task;
use state::SharedState;
use ui::SnakeApp;

#[derive(Parser)]
#[command(name = "snake_desktop_client")]
struct Args {
    /// Overrides `server.address` from the config file.
    #[arg(long)]
    server_address: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = config::get_config_manager();
    let config = match config_manager.get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load config, using defaults: {}", e);
            config::Config::default()
        }
    };

    let server_address = args.server_address.unwrap_or_else(|| config.server.address.clone());
    log!("Using leaderboard server at {}", server_address);

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let runtime = tokio::runtime::Runtime::new()?;
    let score_board = {
        let _guard = runtime.enter();
        GrpcScoreBoard::connect_lazy(&server_address)?
    };

    let task_state = shared_state.clone();
    let settings = config.snake.clone();
    let client_thread = std::thread::spawn(move || {
        runtime.block_on(client_task(
            task_state,
            command_rx,
            LeaderboardClient::new(score_board),
            config_manager,
            settings,
        ));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 760.0])
            .with_title("Snake"),
        ..Default::default()
    };

    let player_name = config.player_name.clone();
    let ui_command_tx = command_tx.clone();
    eframe::run_native(
        "Snake",
        options,
        Box::new(|_cc| Ok(Box::new(SnakeApp::new(shared_state, ui_command_tx, player_name)))),
    )?;

    let _ = command_tx.send(state::ClientCommand::Disconnect);
    if client_thread.join().is_err() {
        log!("Client task thread panicked");
    }

    Ok(())
}
