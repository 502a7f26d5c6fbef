//! Reading a query intent out of a reasoning-service completion.
//!
//! Each tier is a separate function returning `Result` so the resolver can
//! walk them in order and log why a tier was skipped.

use std::sync::LazyLock;

use geoprompt_core::models::QueryIntent;
use regex::Regex;
use thiserror::Error;

static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("object span pattern is valid"));

#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("completion contains no JSON object")]
    NoJsonObject,

    #[error("completion is not a valid intent: {0}")]
    InvalidIntent(#[from] serde_json::Error),

    #[error("intent has an empty query")]
    EmptyQuery,

    #[error("no canned query keyword in the request")]
    NoCatalogKeyword,
}

/// Remove surrounding markdown code fences (```json ... ```)
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}

fn into_executable(intent: QueryIntent) -> Result<QueryIntent, RecoveryError> {
    let intent = intent.normalized();
    if intent.is_executable() {
        Ok(intent)
    } else {
        Err(RecoveryError::EmptyQuery)
    }
}

/// Parse the whole text as an intent
pub fn parse_strict(text: &str) -> Result<QueryIntent, RecoveryError> {
    let intent: QueryIntent = serde_json::from_str(text)?;
    into_executable(intent)
}

/// Parse the outermost `{...}` span, ignoring prose around it
pub fn recover_object(text: &str) -> Result<QueryIntent, RecoveryError> {
    let span = OBJECT_SPAN.find(text).ok_or(RecoveryError::NoJsonObject)?;
    let intent: QueryIntent = serde_json::from_str(span.as_str())?;
    into_executable(intent)
}
