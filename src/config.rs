// Playback and generation limits

use std::time::Duration;

/// Default interval between autoplay advances, in milliseconds
pub const DEFAULT_SPEED_MS: u64 = 500;

/// Fastest autoplay interval accepted by [`crate::player::Player::set_speed_ms`]
pub const MIN_SPEED_MS: u64 = 25;

/// Slowest autoplay interval accepted by [`crate::player::Player::set_speed_ms`]
pub const MAX_SPEED_MS: u64 = 5_000;

/// Speed change applied by one `+`/`-` key press in the viewer
pub const SPEED_STEP_MS: u64 = 50;

/// Upper bound on input length for every generator.
/// Keeps eager generation latency bounded (quadratic sorts stay under ~10k snapshots).
pub const MAX_INPUT_LEN: usize = 64;

/// Largest value counting sort accepts; bounds the count array
pub const MAX_COUNTING_VALUE: i64 = 999;

/// Largest value radix and bucket sort accept
pub const MAX_DISTRIBUTION_VALUE: i64 = 1_000_000;

/// Playback settings for a [`crate::player::Player`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    pub speed: Duration,
    pub min_speed: Duration,
    pub max_speed: Duration,
}

impl PlayerConfig {
    /// Clamp a requested interval into the configured range
    pub fn clamp_speed(&self, speed: Duration) -> Duration {
        speed.clamp(self.min_speed, self.max_speed)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            speed: Duration::from_millis(DEFAULT_SPEED_MS),
            min_speed: Duration::from_millis(MIN_SPEED_MS),
            max_speed: Duration::from_millis(MAX_SPEED_MS),
        }
    }
}
