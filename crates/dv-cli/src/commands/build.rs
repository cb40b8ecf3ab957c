use std::path::Path;

use colored::Colorize;
use dv_compiler::{CompilerConfig, validate, validate_document};

pub fn run(file: &Path, strict: bool) -> Result<(), String> {
    let dungeon = super::compile_file(file)?;

    let issues = if strict {
        let doc = super::load_document(file)?;
        validate_document(&doc, &CompilerConfig::default())
    } else {
        validate(&dungeon)
    };
    for issue in &issues {
        let line = issue.to_string();
        if issue.is_error {
            eprintln!("  {}", line.red());
        } else {
            eprintln!("  {}", line.yellow());
        }
    }
    let errors = issues.iter().filter(|i| i.is_error).count();
    if errors > 0 {
        return Err(format!(
            "validation failed with {errors} error{}",
            super::plural(errors)
        ));
    }

    println!(
        "  Compiled '{}' successfully.",
        super::display_title(&dungeon, file)
    );
    println!();
    println!(
        "  {} rooms, {} doors",
        dungeon.room_count(),
        dungeon.door_count()
    );
    println!("  start:  room {}", dungeon.start());
    if let Some(ending) = dungeon.ending() {
        println!("  ending: room {}", ending.id);
    }

    Ok(())
}
