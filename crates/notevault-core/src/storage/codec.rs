//! Canonical plaintext encoding of a note collection.
//!
//! The plaintext is a JSON object `{"formatVersion": 1, "notes": [...]}`.
//! Field order is fixed by the struct definitions, so encoding the same
//! repository twice yields identical bytes.

use serde::{Deserialize, Serialize};

use crate::error::{NoteError, Result};
use crate::notes::{Note, NoteRepository};

/// Current plaintext format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    format_version: u32,
    notes: &'a [Note],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    format_version: u32,
    notes: Vec<Note>,
}

/// Serialize `repository` to canonical bytes.
pub fn encode(repository: &NoteRepository) -> Result<Vec<u8>> {
    serde_json::to_vec(&EnvelopeRef {
        format_version: FORMAT_VERSION,
        notes: repository.list(),
    })
    .map_err(|e| NoteError::Encode(format!("Failed to serialize notes: {}", e)))
}

/// Parse bytes produced by [`encode`] back into a validated repository.
///
/// # Errors
///
/// Returns `NoteError::CorruptStore` with kind `Schema` for malformed JSON,
/// missing or mistyped fields, an unsupported format version, or notes that
/// break repository invariants.
pub fn decode(bytes: &[u8]) -> Result<NoteRepository> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| NoteError::corrupt_schema(format!("Invalid note data: {}", e)))?;

    if envelope.format_version != FORMAT_VERSION {
        return Err(NoteError::corrupt_schema(format!(
            "Unsupported format version {} (expected {})",
            envelope.format_version, FORMAT_VERSION
        )));
    }

    NoteRepository::from_notes(envelope.notes).map_err(|e| match e {
        NoteError::Validation(message) => NoteError::corrupt_schema(message),
        other => other,
    })
}
