//! Engine crate - shares one board between a tick loop and many callers
//!
//! # Module Structure
//!
//! - [`lock`]: upgradable reader/writer lock around the board
//! - [`dirty`]: dirty flag and the wake side-channel that shortens idle waits
//! - [`queue`]: buffer for moves submitted between passes
//! - [`context`]: the inbound operations (get board, new game, move)
//! - [`engine`]: the tick loop and the outbound [`BoardObserver`] hook
//! - [`clock`], [`config`]: time source and settings
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tile_smash_engine::{Engine, EngineConfig, GameContext, SystemClock};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() {
//! let ctx = Arc::new(GameContext::new(EngineConfig::default(), Arc::new(SystemClock)).unwrap());
//! let observer = Arc::new(|board: &tile_smash_engine::core::BoardSnapshot| {
//!     println!("{} destroyed tiles", board.destroyed_count());
//! });
//! let shutdown = CancellationToken::new();
//! tokio::spawn(Engine::new(ctx.clone(), observer).run(shutdown.clone()));
//!
//! ctx.submit_raw_move(0, 0, "up").unwrap();
//! shutdown.cancel();
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod context;
pub mod dirty;
pub mod engine;
pub mod lock;
pub mod queue;

pub use tile_smash_core as core;
pub use tile_smash_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use context::GameContext;
pub use dirty::DirtyTracker;
pub use engine::{BoardObserver, Engine, PassSummary, TickOutcome};
pub use lock::{BoardLock, BoardReadGuard, BoardUpgradableGuard, BoardWriteGuard};
pub use queue::MoveQueue;
