//! Encounter placement for Delver.
//!
//! Analyzes a compiled dungeon into room buckets (by size, contents, and
//! whether a room lies behind a secret, one-way, or keyed door) and places
//! agents into them. Placement is deterministic for a seeded random source.

pub mod agent;
pub mod analysis;
pub mod config;
pub mod error;
pub mod place;

use dv_core::Dungeon;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use agent::{Agent, AgentClass};
pub use analysis::{Analysis, analyze};
pub use config::EncounterConfig;
pub use error::{EncounterError, EncounterResult};
pub use place::place;

/// Analyze a dungeon and place agents with an RNG seeded from the config.
pub fn populate(dungeon: &Dungeon, config: &EncounterConfig) -> EncounterResult<Vec<Agent>> {
    let analysis = analyze(dungeon);
    let mut rng = StdRng::seed_from_u64(config.seed);
    place(&analysis, config, &mut rng)
}
