use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Stream used to place resource points.
pub const PLACEMENT_STREAM: &str = "placement";

/// Hands out named random streams derived from one session seed, so each
/// consumer sees the same sequence on every run with that seed.
pub struct RngManager {
    master: ChaCha8Rng,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master: ChaCha8Rng::seed_from_u64(seed),
            streams: HashMap::new(),
        }
    }

    /// Streams are derived in first-request order.
    pub fn stream(&mut self, name: &str) -> &mut ChaCha8Rng {
        let master = &mut self.master;
        self.streams.entry(name.to_string()).or_insert_with(|| {
            let mut seed_bytes = [0u8; 8];
            master.fill_bytes(&mut seed_bytes);
            ChaCha8Rng::seed_from_u64(u64::from_le_bytes(seed_bytes))
        })
    }
}
