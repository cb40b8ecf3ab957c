use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use dv_encounters::EncounterConfig;

pub fn run(file: &Path, difficulty: f64, seed: u64) -> Result<(), String> {
    let dungeon = super::compile_file(file)?;
    let config = EncounterConfig::default()
        .with_difficulty(difficulty)
        .with_seed(seed);
    let agents = dv_encounters::populate(&dungeon, &config).map_err(|e| e.to_string())?;

    if agents.is_empty() {
        println!("  No agents placed.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Agent", "Room", "Kind", "Area"]);

    for agent in &agents {
        let (kind, area) = dungeon
            .room(agent.room)
            .map(|r| (r.kind.noun_phrase(), r.area.as_str()))
            .unwrap_or(("?", "?"));
        table.add_row(vec![
            agent.class.to_string(),
            agent.room.to_string(),
            kind.to_string(),
            area.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} agents at difficulty {:.1} (seed {seed})",
        agents.len(),
        config.difficulty
    );

    Ok(())
}
