//! Engine configuration

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DESTROY_DELAY_MS, TICK_MS};

/// Board geometry and timing for one engine instance
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    /// Longest idle wait between passes
    pub tick_interval: Duration,
    /// Grace period between destruction and clearing
    pub destroy_delay: Duration,
    /// Seed for tile color generation
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            tick_interval: Duration::from_millis(TICK_MS),
            destroy_delay: Duration::from_millis(DESTROY_DELAY_MS),
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    ///
    /// - `TILE_SMASH_WIDTH` / `TILE_SMASH_HEIGHT`: board size
    /// - `TILE_SMASH_TICK_MS`: idle tick interval
    /// - `TILE_SMASH_DESTROY_DELAY_MS`: grace period
    /// - `TILE_SMASH_SEED`: color seed (defaults to the current time)
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            env::var(key).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();

        let width = parsed::<usize>("TILE_SMASH_WIDTH")
            .filter(|w| *w > 0)
            .unwrap_or(defaults.width);
        let height = parsed::<usize>("TILE_SMASH_HEIGHT")
            .filter(|h| *h > 0)
            .unwrap_or(defaults.height);

        let tick_interval = parsed::<u64>("TILE_SMASH_TICK_MS")
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick_interval);
        let destroy_delay = parsed::<u64>("TILE_SMASH_DESTROY_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.destroy_delay);

        let seed = parsed::<u32>("TILE_SMASH_SEED").unwrap_or_else(time_seed);

        Self {
            width,
            height,
            tick_interval,
            destroy_delay,
            seed,
        }
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
