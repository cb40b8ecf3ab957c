//! Agent placement over an [`Analysis`].

use dv_core::RoomId;
use dv_core::random::{RandomSource, shuffle};

use crate::agent::{Agent, AgentClass};
use crate::analysis::Analysis;
use crate::config::EncounterConfig;
use crate::error::{EncounterError, EncounterResult};

/// How many of `len` candidates survive at a given scale.
fn scaled(len: usize, factor: f64) -> usize {
    let n = (len as f64 * factor).round();
    if n <= 0.0 { 0 } else { (n as usize).min(len) }
}

/// Place agents into rooms.
///
/// - **Boss**: the ending room, else the largest locked room.
/// - **Monsters**: large unlocked rooms, most exits first.
/// - **Elites**: locked treasure rooms other than the boss's.
/// - **Peons**: unlocked treasure rooms whose loot is not hidden, shuffled.
///
/// Difficulty scales how many monsters, elites, and peons are kept; the
/// boss is always placed when a candidate exists.
pub fn place(
    analysis: &Analysis,
    config: &EncounterConfig,
    rng: &mut dyn RandomSource,
) -> EncounterResult<Vec<Agent>> {
    let difficulty = config.difficulty;
    if !difficulty.is_finite() || difficulty < 0.0 {
        return Err(EncounterError::InvalidDifficulty(difficulty));
    }

    let mut agents = Vec::new();

    let boss = analysis.ending.or_else(|| {
        analysis
            .locked
            .iter()
            .copied()
            .max_by(|a, b| analysis.area(*a).cmp(&analysis.area(*b)).then(b.cmp(a)))
    });
    if let Some(room) = boss {
        agents.push(Agent::new(AgentClass::Boss, room));
    }
    let not_boss = |room: &RoomId| Some(*room) != boss;

    let mut monsters: Vec<RoomId> = analysis
        .very_large
        .iter()
        .chain(&analysis.large)
        .filter(|r| !analysis.is_locked(**r))
        .filter(|r| not_boss(*r))
        .copied()
        .collect();
    monsters.sort_by(|a, b| analysis.exits(*b).cmp(&analysis.exits(*a)).then(a.cmp(b)));
    monsters.truncate(scaled(monsters.len(), difficulty * 0.5));
    agents.extend(monsters.into_iter().map(|r| Agent::new(AgentClass::Monster, r)));

    let mut elites: Vec<RoomId> = analysis
        .treasure
        .iter()
        .filter(|r| analysis.is_locked(**r))
        .filter(|r| Some(**r) != analysis.ending)
        .filter(|r| not_boss(*r))
        .copied()
        .collect();
    elites.truncate(scaled(elites.len(), difficulty));
    agents.extend(elites.into_iter().map(|r| Agent::new(AgentClass::Elite, r)));

    let mut peons: Vec<RoomId> = analysis
        .treasure
        .iter()
        .filter(|r| !analysis.is_locked(**r))
        .filter(|r| !analysis.secret_treasure.contains(*r))
        .copied()
        .collect();
    shuffle(&mut peons, rng);
    peons.truncate(scaled(peons.len(), difficulty * 0.5));
    agents.extend(peons.into_iter().map(|r| Agent::new(AgentClass::Peon, r)));

    tracing::debug!(agents = agents.len(), difficulty, "placed encounters");
    Ok(agents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, fixtures};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn run(ending: bool, difficulty: f64, seed: u64) -> Vec<Agent> {
        let analysis = analyze(&fixtures::keep(ending));
        let config = EncounterConfig::default().with_difficulty(difficulty);
        place(&analysis, &config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn classes_follow_preference_order() {
        assert_eq!(
            run(true, 1.0, 42),
            vec![
                Agent::new(AgentClass::Boss, RoomId(5)),
                Agent::new(AgentClass::Monster, RoomId(3)),
                Agent::new(AgentClass::Elite, RoomId(7)),
                Agent::new(AgentClass::Peon, RoomId(3)),
            ]
        );
    }

    #[test]
    fn boss_falls_back_to_largest_locked_room() {
        let agents = run(false, 1.0, 42);
        assert_eq!(agents[0], Agent::new(AgentClass::Boss, RoomId(5)));
        let elites: Vec<RoomId> = agents
            .iter()
            .filter(|a| a.class == AgentClass::Elite)
            .map(|a| a.room)
            .collect();
        assert_eq!(elites, vec![RoomId(7)]);
    }

    #[test]
    fn zero_difficulty_places_only_the_boss() {
        assert_eq!(run(true, 0.0, 42), vec![Agent::new(AgentClass::Boss, RoomId(5))]);
    }

    #[test]
    fn deterministic_for_a_seed() {
        assert_eq!(run(true, 3.0, 7), run(true, 3.0, 7));
    }

    #[test]
    fn invalid_difficulty_rejected() {
        let analysis = Analysis::default();
        let config = EncounterConfig {
            difficulty: -2.0,
            seed: 1,
        };
        let err = place(&analysis, &config, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, EncounterError::InvalidDifficulty(-2.0));
    }

    #[test]
    fn scaling_rounds_and_caps() {
        assert_eq!(scaled(0, 1.0), 0);
        assert_eq!(scaled(1, 0.5), 1);
        assert_eq!(scaled(4, 0.5), 2);
        assert_eq!(scaled(4, 3.0), 4);
        assert_eq!(scaled(4, 0.0), 0);
    }

    #[test]
    fn populate_uses_config_seed() {
        let dungeon = fixtures::keep(true);
        let config = EncounterConfig::default().with_seed(9);
        assert_eq!(crate::populate(&dungeon, &config).unwrap(), run(true, 1.0, 9));
    }
}
