//! Inbound payload validation
//!
//! The single structural invariant on the inbound body is that `parts`
//! exists and is an array. `systemInstruction` is passed through
//! unvalidated; the upstream tolerates its absence.

use serde_json::Value;

use crate::error::AppError;

/// Validated generation payload extracted from an inbound request body
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPayload {
    /// Opaque content parts, forwarded to the upstream in order
    pub parts: Vec<Value>,
    pub system_instruction: Option<String>,
}

/// Validate the inbound JSON body and extract the generation payload.
///
/// Pure function: no side effects, no suspension.
pub fn validate_payload(body: &Value) -> Result<GenerationPayload, AppError> {
    let parts = body
        .get("parts")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::MalformedPayload("parts missing or not an array".to_string()))?;

    Ok(GenerationPayload {
        parts: parts.clone(),
        system_instruction: body
            .get("systemInstruction")
            .and_then(Value::as_str)
            .map(str::to_owned),
    })
}
