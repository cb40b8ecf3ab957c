//! Configuration for encounter placement.

/// Highest accepted difficulty.
pub const MAX_DIFFICULTY: f64 = 3.0;

/// Configuration for encounter placement.
#[derive(Debug, Clone)]
pub struct EncounterConfig {
    /// Scales how many monsters, elites, and peons are placed.
    pub difficulty: f64,
    /// RNG seed for reproducible peon placement.
    pub seed: u64,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            difficulty: 1.0,
            seed: 42,
        }
    }
}

impl EncounterConfig {
    /// Set the difficulty (clamped to 0-3).
    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = if difficulty.is_nan() {
            1.0
        } else {
            difficulty.clamp(0.0, MAX_DIFFICULTY)
        };
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EncounterConfig::default();
        assert_eq!(cfg.difficulty, 1.0);
        assert_eq!(cfg.seed, 42);
    }

    #[test]
    fn difficulty_clamped() {
        assert_eq!(EncounterConfig::default().with_difficulty(10.0).difficulty, 3.0);
        assert_eq!(EncounterConfig::default().with_difficulty(-1.0).difficulty, 0.0);
        assert_eq!(EncounterConfig::default().with_difficulty(f64::NAN).difficulty, 1.0);
    }
}
