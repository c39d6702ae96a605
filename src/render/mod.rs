//! Rendering of structured documents.

mod json;
mod text;

pub use json::{chunks_to_jsonl, to_json, JsonFormat};
pub use text::to_outline;
