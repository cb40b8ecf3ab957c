pub mod build;
pub mod encounters;
pub mod export;
pub mod play;
pub mod show;

use std::path::Path;

use colored::Colorize;
use dv_compiler::{CompileResult, CompilerConfig, Severity};
use dv_core::{Dungeon, DungeonDocument};

/// Read and parse a dungeon document.
fn load_document(path: &Path) -> Result<DungeonDocument, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    DungeonDocument::from_json(&source).map_err(|e| format!("{}: {e}", path.display()))
}

/// Compile a document file and print diagnostics.
/// Returns the compiled dungeon if there are no errors.
fn compile_file(path: &Path) -> Result<Dungeon, String> {
    let doc = load_document(path)?;
    let result = dv_compiler::compile_seeded(&doc, &CompilerConfig::default());
    print_diagnostics(&result);

    if result.has_errors() {
        Err("compilation failed with errors".into())
    } else {
        Ok(result.dungeon)
    }
}

/// Print diagnostics to stderr with a summary line.
fn print_diagnostics(result: &CompileResult) {
    if result.diagnostics.is_empty() {
        return;
    }

    for diag in &result.diagnostics {
        let line = diag.to_string();
        match diag.severity {
            Severity::Error => eprintln!("  {}", line.red()),
            Severity::Warning => eprintln!("  {}", line.yellow()),
        }
    }

    let errors = result
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = result.warnings().count();
    eprintln!(
        "  {} error{}, {} warning{}",
        errors,
        plural(errors),
        warnings,
        plural(warnings),
    );
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Title for display, falling back to the file stem.
fn display_title<'a>(dungeon: &'a Dungeon, path: &'a Path) -> &'a str {
    if dungeon.title.is_empty() {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
    } else {
        &dungeon.title
    }
}
