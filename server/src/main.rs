mod grpc_service;
mod score_store;
mod server_config;
mod web_server;

use tonic::transport::Server;
use common::{
    leaderboard_server::LeaderboardServer,
    logger,
    log,
};
use clap::Parser;
use grpc_service::LeaderboardServiceImpl;
use score_store::ScoreStore;

#[derive(Parser)]
#[command(name = "snake_leaderboard_server")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Path to the YAML config; defaults are used when the file does not exist.
    #[arg(long)]
    config: Option<String>,

    /// Overrides `grpc_address` from the config file.
    #[arg(long)]
    grpc_address: Option<String>,

    #[arg(long)]
    no_web: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = server_config::get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_config()?;
    log!("Loaded config from {}", config_manager.file_path().display());

    if let Some(grpc_address) = args.grpc_address {
        config.grpc_address = grpc_address;
    }
    if args.no_web {
        config.web_address = None;
    }

    let grpc_addr = config.grpc_socket_addr()?;
    let web_addr = config.web_socket_addr()?;
    let store = ScoreStore::new(config.max_entries);

    if let Some(web_addr) = web_addr {
        let web_store = store.clone();
        tokio::spawn(async move {
            if let Err(e) = web_server::run_web_server(web_store, web_addr).await {
                log!("Web server error: {}", e);
            }
        });
    }

    log!(
        "Leaderboard server listening on {} (keeping top {} scores)",
        grpc_addr,
        config.max_entries
    );

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    Server::builder()
        .add_service(LeaderboardServer::new(LeaderboardServiceImpl::new(store)))
        .serve_with_shutdown(grpc_addr, shutdown_signal)
        .await?;

    log!("Server shut down gracefully");

    Ok(())
}
