//! Tile Smash server (default binary).
//!
//! Runs the board engine and serves it to remote clients over TCP.
//! Settings come from `TILE_SMASH_*` environment variables; log filtering
//! from `RUST_LOG` (default `info`).

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tile_smash::adapter::{run_server, ChannelObserver, ServerConfig};
use tile_smash::engine::{Engine, EngineConfig, GameContext, SystemClock};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let engine_config = EngineConfig::from_env();
    let server_config = ServerConfig::from_env();
    info!(
        width = engine_config.width,
        height = engine_config.height,
        seed = engine_config.seed,
        "starting tile-smash"
    );

    // Board generation finishes here, before any client can connect.
    let ctx = Arc::new(
        GameContext::new(engine_config, Arc::new(SystemClock))
            .context("failed to generate the initial board")?,
    );
    let (observer, board_rx) = ChannelObserver::channel();
    let shutdown = CancellationToken::new();

    let engine = {
        let engine = Engine::new(Arc::clone(&ctx), observer);
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            engine.run(shutdown.clone()).await;
            // Engine exiting for any reason ends the server too.
            shutdown.cancel();
        })
    };
    let server = tokio::spawn(run_server(
        server_config,
        Arc::clone(&ctx),
        board_rx,
        None,
        shutdown.clone(),
    ));

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("ctrl-c received, shutting down");
                    shutdown.cancel();
                }
                Err(e) => error!(error = %e, "failed to listen for ctrl-c"),
            }
        });
    }

    let server_result = server.await.context("server task panicked")?;
    if let Err(e) = &server_result {
        error!(error = %e, "server failed");
    }
    shutdown.cancel();

    engine.await.context("engine task panicked")?;
    server_result
}
