use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dv_core::{Dungeon, RoomId};

pub fn run(file: &Path, room: Option<usize>) -> Result<(), String> {
    let dungeon = super::compile_file(file)?;
    match room {
        Some(id) => show_room(&dungeon, RoomId(id)),
        None => {
            show_table(&dungeon, file);
            Ok(())
        }
    }
}

fn show_table(dungeon: &Dungeon, file: &Path) {
    println!("  {}", super::display_title(dungeon, file).bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Kind", "Area", "Exits", "Notes"]);

    for room in dungeon.rooms() {
        let mut kind = room.kind.noun_phrase().to_string();
        if room.is_ending() {
            kind.push_str(" (ending)");
        } else if room.id == dungeon.start() {
            kind.push_str(" (start)");
        }
        let exits = room
            .exits
            .iter()
            .map(|e| format!("{} to {}", e.towards, e.to))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            room.id.to_string(),
            kind,
            room.area.clone(),
            exits,
            room.notes.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} rooms", dungeon.room_count());
}

fn show_room(dungeon: &Dungeon, id: RoomId) -> Result<(), String> {
    let room = dungeon.get_room(id).map_err(|e| e.to_string())?;

    println!(
        "  {} [{}]",
        format!("Room {}", room.id).bold(),
        room.kind.noun_phrase().dimmed()
    );
    println!();
    println!("  {}", room.description);
    println!("  {}", room.area.dimmed());

    if !room.exits.is_empty() {
        println!();
        println!("  {}", "Exits:".dimmed());
        let mut exits: Vec<_> = room.exits.iter().collect();
        dungeon.sort_clockwise(room, &mut exits);
        for exit in exits {
            let hidden = if exit.is_hidden_secret() { " (hidden)" } else { "" };
            println!("    {:<6} {}{}", exit.towards, exit.description, hidden.dimmed());
        }
    }

    if !room.notes.is_empty() {
        println!();
        println!("  {}", "Notes:".dimmed());
        for note in &room.notes {
            println!("    [{}] {}", note.kind.tag(), note.text);
        }
    }

    Ok(())
}
