//! TCP server for the board adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::CoreError;
use crate::engine::GameContext;
use crate::protocol::*;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    ///
    /// - `TILE_SMASH_HOST`: bind address (default "127.0.0.1")
    /// - `TILE_SMASH_PORT`: port (default 7878, 0 picks a free port)
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("TILE_SMASH_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("TILE_SMASH_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7878);

        Self { host, port }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid socket address {}:{}", self.host, self.port))
    }
}

/// Shared server state
pub struct ServerState {
    game: Arc<GameContext>,
    clients: RwLock<Vec<ClientHandle>>,
}

impl ServerState {
    pub fn new(game: Arc<GameContext>) -> Self {
        Self {
            game,
            clients: RwLock::new(Vec::new()),
        }
    }
}

/// Handle to a connected client
pub struct ClientHandle {
    pub id: usize,
    pub tx: mpsc::UnboundedSender<ClientOutbound>,
}

#[derive(Debug, Clone)]
pub enum ClientOutbound {
    Board(BoardMessage),
    Ack(AckMessage),
    Error(ErrorMessage),
}

/// Start the TCP server
///
/// Boards arriving on `board_rx` are pushed to every connected client. Runs
/// until `shutdown` is cancelled or the listener fails.
pub async fn run_server(
    config: ServerConfig,
    game: Arc<GameContext>,
    mut board_rx: mpsc::UnboundedReceiver<BoardMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let bound = listener.local_addr()?;
    info!(%bound, "TCP server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::new(game));
    let mut client_id_counter = 0usize;

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(board) = board_rx.recv().await {
                let clients = state.clients.read().await;
                debug!(seq = board.seq, clients = clients.len(), "broadcasting board");
                for c in clients.iter() {
                    let _ = c.tx.send(ClientOutbound::Board(board.clone()));
                }
            }
        });
    }

    // Accept incoming connections
    loop {
        let (socket, addr) = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => accepted?,
        };
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!(client_id, %addr, "client connected");

        let state_clone = Arc::clone(&state);
        let shutdown = shutdown.clone();

        // Spawn task to handle this client
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, state_clone, shutdown).await {
                warn!(client_id, %addr, error = %e, "client error");
            }
            info!(client_id, %addr, "client disconnected");
        });
    }

    info!("TCP server stopped");
    Ok(())
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<ServerState>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    {
        let mut clients = state.clients.write().await;
        clients.push(ClientHandle {
            id: client_id,
            tx: tx.clone(),
        });
    }

    // Spawn task to write messages to client
    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            let encoded = match &msg {
                ClientOutbound::Board(m) => serde_json::to_writer(&mut buf, m),
                ClientOutbound::Ack(m) => serde_json::to_writer(&mut buf, m),
                ClientOutbound::Error(m) => serde_json::to_writer(&mut buf, m),
            };
            if encoded.is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    // Handle incoming messages
    let mut line = String::new();
    let result = loop {
        line.clear();
        let bytes_read = tokio::select! {
            _ = shutdown.cancelled() => break Ok(()),
            read = reader.read_line(&mut line) => match read {
                Ok(n) => n,
                Err(e) => break Err(e.into()),
            },
        };

        if bytes_read == 0 {
            // Client disconnected
            break Ok(());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let reply = handle_line(&state.game, trimmed).await;
        if let ClientOutbound::Error(err) = &reply {
            debug!(client_id, code = ?err.code, message = %err.message, "request rejected");
        }
        let _ = tx.send(reply);
    };

    {
        let mut clients = state.clients.write().await;
        clients.retain(|c| c.id != client_id);
    }
    drop(tx);
    let _ = write_task.await;

    result
}

/// Answer one request line
///
/// Board generation for `new_game` is bounded by `MAX_GENERATION_PASSES`
/// full-board scans, so it runs on the blocking pool.
pub async fn handle_line(game: &Arc<GameContext>, line: &str) -> ClientOutbound {
    match parse_message(line) {
        Ok(ParsedMessage::GetBoard(m)) => ClientOutbound::Board(create_board(m.seq, &game.get_board())),
        Ok(ParsedMessage::NewGame(m)) => {
            let game = Arc::clone(game);
            let generated = tokio::task::spawn_blocking(move || game.start_new_game())
                .await
                .map_err(|e| e.to_string())
                .and_then(|r| r.map_err(|e| e.to_string()));
            match generated {
                Ok(()) => ClientOutbound::Ack(create_ack(m.seq, true)),
                Err(message) => ClientOutbound::Error(create_error(
                    Some(m.seq),
                    ErrorCode::GenerationFailed,
                    &message,
                )),
            }
        }
        Ok(ParsedMessage::Move(m)) => match game.submit_raw_move(m.x, m.y, &m.direction) {
            Ok(accepted) => ClientOutbound::Ack(create_ack(m.seq, accepted)),
            Err(e @ CoreError::UnknownDirection(_)) => ClientOutbound::Error(create_error(
                Some(m.seq),
                ErrorCode::InvalidDirection,
                &e.to_string(),
            )),
            Err(e) => ClientOutbound::Error(create_error(
                Some(m.seq),
                ErrorCode::InvalidMessage,
                &e.to_string(),
            )),
        },
        Ok(ParsedMessage::Unknown(u)) => ClientOutbound::Error(create_error(
            u.seq,
            ErrorCode::UnknownType,
            &format!("unknown message type {:?}", u.msg_type),
        )),
        Err(e) => ClientOutbound::Error(create_error(
            extract_seq(line),
            ErrorCode::InvalidMessage,
            &e.to_string(),
        )),
    }
}
