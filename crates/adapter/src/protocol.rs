//! Protocol module - JSON message types for the board adapter
//!
//! Line-delimited JSON. Every message carries `type` and `seq`; server
//! messages also carry `ts` (milliseconds since the Unix epoch).

use serde::{Deserialize, Serialize};

use crate::core::{BoardSnapshot, TileSnapshot};
use crate::types::TileColor;

// ============== Client -> Server Messages ==============

/// Request the current board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBoardMessage {
    pub seq: u64,
}

/// Replace the board with a freshly generated one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameMessage {
    pub seq: u64,
}

/// Swap the tile at (`x`, `y`) with its neighbour in `direction`
///
/// `direction` stays a string here so an unknown value can be reported back
/// instead of failing the whole line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveMessage {
    pub seq: u64,
    pub x: i32,
    pub y: i32,
    pub direction: String,
}

#[derive(Debug, Clone)]
pub enum ParsedMessage {
    GetBoard(GetBoardMessage),
    NewGame(NewGameMessage),
    Move(MoveMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: Option<u64>,
    pub msg_type: String,
}

/// Parse one inbound line
///
/// Valid JSON with an unrecognized `type` yields `ParsedMessage::Unknown`;
/// anything else that fails to parse is an error.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "get_board")]
        GetBoard(GetBoardMessage),
        #[serde(rename = "new_game")]
        NewGame(NewGameMessage),
        #[serde(rename = "move")]
        Move(MoveMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::GetBoard(m)) => Ok(ParsedMessage::GetBoard(m)),
        Ok(InboundMessage::NewGame(m)) => Ok(ParsedMessage::NewGame(m)),
        Ok(InboundMessage::Move(m)) => Ok(ParsedMessage::Move(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct TypeOnly {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let head = serde_json::from_str::<TypeOnly>(json)?;
            match head.msg_type {
                Some(t) if !matches!(t.as_str(), "get_board" | "new_game" | "move") => {
                    Ok(ParsedMessage::Unknown(UnknownMessage {
                        seq: head.seq,
                        msg_type: t,
                    }))
                }
                // Known type with bad fields, or no type at all.
                _ => Err(e),
            }
        }
    }
}

/// Best-effort `seq` from a line that failed to parse, for error replies
pub fn extract_seq(json: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()?
        .get("seq")?
        .as_u64()
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardType {
    #[serde(rename = "board")]
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Line was not valid JSON or missed required fields
    #[serde(rename = "invalid_message")]
    InvalidMessage,
    /// `type` not understood
    #[serde(rename = "unknown_type")]
    UnknownType,
    /// Move direction outside up/down/left/right
    #[serde(rename = "invalid_direction")]
    InvalidDirection,
    /// New board could not be generated
    #[serde(rename = "generation_failed")]
    GenerationFailed,
}

/// Wire form of a tile color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    Empty,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl From<TileColor> for ColorName {
    fn from(value: TileColor) -> Self {
        match value {
            TileColor::Empty => ColorName::Empty,
            TileColor::Red => ColorName::Red,
            TileColor::Green => ColorName::Green,
            TileColor::Blue => ColorName::Blue,
            TileColor::Yellow => ColorName::Yellow,
            TileColor::Purple => ColorName::Purple,
            TileColor::Orange => ColorName::Orange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileWire {
    pub color: ColorName,
    /// Matched and waiting to be cleared
    pub destroyed: bool,
}

impl From<TileSnapshot> for TileWire {
    fn from(value: TileSnapshot) -> Self {
        Self {
            color: value.color.into(),
            destroyed: value.destroyed,
        }
    }
}

/// Full board, sent in reply to `get_board` and pushed after every change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMessage {
    #[serde(rename = "type")]
    pub msg_type: BoardType,
    pub seq: u64,
    pub ts: u64,
    pub width: usize,
    pub height: usize,
    pub game_over: bool,
    /// Stable FNV-1a hash of the tile grid; equal hashes mean equal boards
    pub state_hash: String,
    /// `rows[y][x]`, bottom row first
    pub rows: Vec<Vec<TileWire>>,
}

/// Acknowledgment for `new_game` and `move`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    /// False when a move was dropped by validation
    pub accepted: bool,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

// ============== Utility Functions ==============

/// 64-bit FNV-1a; output must stay identical across builds and platforms.
struct Fnv1a(u64);

impl Fnv1a {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
    }
}

pub fn state_hash(board: &BoardSnapshot) -> String {
    let mut h = Fnv1a::new();
    h.write(&(board.width as u64).to_le_bytes());
    h.write(&(board.height as u64).to_le_bytes());
    for tile in &board.tiles {
        h.write(&[tile.color.index() as u8, tile.destroyed as u8]);
    }
    format!("{:016x}", h.0)
}

/// Build a board message from a snapshot
pub fn create_board(seq: u64, board: &BoardSnapshot) -> BoardMessage {
    BoardMessage {
        msg_type: BoardType::Board,
        seq,
        ts: current_timestamp_ms(),
        width: board.width,
        height: board.height,
        game_over: board.game_over,
        state_hash: state_hash(board),
        rows: board
            .rows()
            .map(|row| row.iter().copied().map(TileWire::from).collect())
            .collect(),
    }
}

pub fn create_ack(seq: u64, accepted: bool) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        accepted,
    }
}

/// Create an error message
pub fn create_error(seq: Option<u64>, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
