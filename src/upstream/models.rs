//! Upstream generation API data models
//!
//! Wire types for the `generateContent` request and response. The request
//! side is built deterministically from a validated payload; the response
//! side is deserialized tolerantly, since the only segment this gateway
//! relies on is `candidates[0].content.parts[0].text`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::GenerationPayload;

/// Request body for `POST {base}/{model}:generateContent`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
}

/// A single turn of content, with opaque parts forwarded as received
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Value>,
}

/// System instruction wrapper expected by the upstream schema
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SystemInstruction {
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextPart {
    pub text: String,
}

impl GenerateContentRequest {
    /// Map a validated payload into the upstream schema.
    ///
    /// Deterministic and order-preserving on `parts`; the system
    /// instruction is omitted entirely when the payload carries none.
    pub fn from_payload(payload: &GenerationPayload) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: payload.parts.clone(),
            }],
            system_instruction: payload.system_instruction.as_ref().map(|text| {
                SystemInstruction {
                    parts: vec![TextPart { text: text.clone() }],
                }
            }),
        }
    }
}

/// Response body of a successful `generateContent` call
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Extract the first candidate's first text part, if any segment exists
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}
