//! Tile Smash (workspace facade crate).
//!
//! Re-exports the `tile_smash::{core,engine,adapter,types}` API while the
//! implementation lives in dedicated crates under `crates/`.

pub use tile_smash_adapter as adapter;
pub use tile_smash_core as core;
pub use tile_smash_engine as engine;
pub use tile_smash_types as types;
