//! JSON rendering for structured documents.

use crate::error::{Error, Result};
use crate::model::DocumentStructure;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a structure to `{metadata, sections, chunks}` JSON.
pub fn to_json(structure: &DocumentStructure, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(structure),
        JsonFormat::Compact => serde_json::to_string(structure),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert the chunk stream to JSON Lines, one compact chunk per line.
pub fn chunks_to_jsonl(structure: &DocumentStructure) -> Result<String> {
    let mut out = String::new();
    for chunk in &structure.chunks {
        let line = serde_json::to_string(chunk)
            .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}
