//! Configuration for dungeon compilation.

/// Configuration for the geometry compiler.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// RNG seed for reproducible flavor text.
    pub seed: u64,
    /// Flooded cell count at which water prose gains a random flourish.
    pub flourish_threshold: usize,
    /// Feet per grid cell, used in area prose.
    pub cell_feet: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            flourish_threshold: 6,
            cell_feet: 5,
        }
    }
}

impl CompilerConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the flourish threshold (at least one cell).
    pub fn with_flourish_threshold(mut self, cells: usize) -> Self {
        self.flourish_threshold = cells.max(1);
        self
    }

    /// Set the cell size in feet (at least one).
    pub fn with_cell_feet(mut self, feet: u32) -> Self {
        self.cell_feet = feet.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = CompilerConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.flourish_threshold, 6);
        assert_eq!(cfg.cell_feet, 5);
    }

    #[test]
    fn builder_methods() {
        let cfg = CompilerConfig::default()
            .with_seed(7)
            .with_flourish_threshold(10)
            .with_cell_feet(10);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.flourish_threshold, 10);
        assert_eq!(cfg.cell_feet, 10);
    }

    #[test]
    fn values_clamped() {
        let cfg = CompilerConfig::default()
            .with_flourish_threshold(0)
            .with_cell_feet(0);
        assert_eq!(cfg.flourish_threshold, 1);
        assert_eq!(cfg.cell_feet, 1);
    }
}
