use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use dv_encounters::EncounterConfig;
use dv_engine::{Action, Output, Session};

pub fn run(file: &Path, seed: u64, json: bool, difficulty: f64) -> Result<(), String> {
    let dungeon = super::compile_file(file)?;
    let config = EncounterConfig::default()
        .with_difficulty(difficulty)
        .with_seed(seed);
    let agents = if config.difficulty > 0.0 {
        dv_encounters::populate(&dungeon, &config).map_err(|e| e.to_string())?
    } else {
        Vec::new()
    };
    tracing::debug!(agents = agents.len(), "placed agents");

    let title = super::display_title(&dungeon, file).to_string();
    let mut session = Session::new(Arc::new(dungeon)).with_agents(agents);

    if !json {
        println!("  {}", title.bold());
        println!("  Type a direction, an exit number, 'search', 'use', or 'quit'.\n");
    }
    let output = session
        .act(Action::Init)
        .map_err(|e| format!("failed to start session: {e}"))?;
    emit(&output, json)?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !session.is_over() {
        if !json {
            print!("> ");
            io::stdout().flush().map_err(|e| e.to_string())?;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let output = session.step(input).map_err(|e| e.to_string())?;
        emit(&output, json)?;
    }

    Ok(())
}

fn emit(output: &Output, json: bool) -> Result<(), String> {
    if json {
        let record =
            serde_json::to_string(output).map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{record}");
    } else {
        print_output(output);
    }
    Ok(())
}

fn print_output(output: &Output) {
    if output.error.is_some() {
        println!("{}\n", output.message.yellow());
        return;
    }
    if !output.message.is_empty() {
        println!("{}\n", output.message.bold());
    }
    if output.end {
        return;
    }

    println!("{}", output.description);
    for agent in &output.agents {
        println!("{}", format!("Something stirs here: a {agent}.").red());
    }
    for exit in &output.exits {
        println!("  {}", exit.description);
    }
    for imperative in &output.imperatives {
        println!("  {} {}", imperative.text, format!("({})", imperative.command).dimmed());
    }
    if !output.inventory.is_empty() {
        println!("  {} {}", "Carrying:".dimmed(), output.inventory.join(", "));
    }
    println!();
}
