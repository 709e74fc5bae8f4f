//! Adapter crate - remote play over TCP with a JSON line protocol
//!
//! External clients (bots, test harnesses, a UI process) drive the board
//! through a TCP socket. Every message is one JSON object per line.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Requests**: Client sends `get_board`, `new_game` or `move`
//! 3. **Replies**: Server answers each request with `board`, `ack` or `error`,
//!    echoing the request `seq`
//! 4. **Pushes**: Whenever an engine pass changes the board, every connected
//!    client receives an unsolicited `board` message
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **get_board**: Request the current board
//! - **new_game**: Regenerate the board
//! - **move**: Swap the tile at `x`,`y` with its neighbour in `direction`
//!
//! ## Server → Client
//!
//! - **board**: Full board, rows listed from `y = 0` upwards
//! - **ack**: Request accepted (`accepted: false` when a move was rejected)
//! - **error**: Malformed or unknown request
//!
//! # Environment Variables
//!
//! - `TILE_SMASH_HOST`: Bind address (default: "127.0.0.1")
//! - `TILE_SMASH_PORT`: Port number (default: 7878)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"get_board","seq":1}
//! Server -> Client: {"type":"board","seq":1,"ts":1234567890,"width":8,"height":8,"game_over":false,...}
//! Client -> Server: {"type":"move","seq":2,"x":3,"y":0,"direction":"left"}
//! Server -> Client: {"type":"ack","seq":2,"ts":1234567891,"accepted":true}
//! Server -> Client: {"type":"board","seq":1,"ts":1234567891,...}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"get_board","seq":1}
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use tile_smash_core as core;
pub use tile_smash_engine as engine;
pub use tile_smash_types as types;

pub use protocol::*;
pub use runtime::ChannelObserver;
pub use server::*;
