use std::path::Path;

pub fn run(file: &Path, output: Option<&Path>) -> Result<(), String> {
    let dungeon = super::compile_file(file)?;
    let content = serde_json::to_string_pretty(&dungeon)
        .map_err(|e| format!("JSON serialization error: {e}"))?;

    if let Some(path) = output {
        std::fs::write(path, format!("{content}\n"))
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}
