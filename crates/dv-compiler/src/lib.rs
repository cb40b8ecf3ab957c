//! Geometry compiler for Delver.
//!
//! Turns a [`DungeonDocument`](dv_core::DungeonDocument) of rectangles, door
//! records, and notes into a navigable [`Dungeon`](dv_core::Dungeon): rooms
//! with generated prose, directional exits, and classified notes.

/// Compiler passes and the compile result.
pub mod compiler;
/// Compiler configuration.
pub mod config;
/// Diagnostics for document anomalies.
pub mod diagnostics;
/// Room and exit prose generation.
pub mod prose;
/// Structural validation of compiled dungeons.
pub mod validate;

use dv_core::{DungeonDocument, DvResult};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use compiler::{CompileResult, compile};
pub use config::CompilerConfig;
pub use diagnostics::{Diagnostic, Severity};
pub use validate::{ValidationIssue, validate, validate_document};

/// Compile a document with an RNG seeded from the configuration.
pub fn compile_seeded(doc: &DungeonDocument, config: &CompilerConfig) -> CompileResult {
    let mut rng = StdRng::seed_from_u64(config.seed);
    compile(doc, config, &mut rng)
}

/// Parse a JSON document and compile it.
pub fn compile_json(source: &str, config: &CompilerConfig) -> DvResult<CompileResult> {
    let doc = DungeonDocument::from_json(source)?;
    Ok(compile_seeded(&doc, config))
}
