use crate::models::ModelEnvelope;

/// Flattens a model response envelope into one text blob
///
/// Non-empty part texts are joined with newlines in envelope order. The
/// result is not trimmed; an envelope without text yields an empty string.
pub fn extract_text(envelope: &ModelEnvelope) -> String {
    envelope
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.text.as_deref())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
