use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

use super::segmenter::EventBlock;
use crate::config::Event;
use crate::normalizer::name_from_slug;

const META_LINE: usize = 3;
const URL_LINE: usize = 4;

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"calendly\.com/([^/]+)/").expect("slug pattern is valid")
});

/// Why a single field came back empty. Never escapes the block.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("block has no line at position {0}")]
    MissingLine(usize),
    #[error("metadata is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("customIDs.workspaceId missing or not a string")]
    MissingWorkspaceId,
    #[error("no calendly.com/<slug>/ segment in URL line")]
    NoSchedulingSlug,
}

pub fn workspace_id(block: &EventBlock<'_>) -> Result<String, FieldError> {
    let raw = block
        .line(META_LINE)
        .ok_or(FieldError::MissingLine(META_LINE))?;
    let meta: Value =
        serde_json::from_str(raw).map_err(|e| FieldError::InvalidJson(e.to_string()))?;
    meta.get("customIDs")
        .and_then(|ids| ids.get("workspaceId"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(FieldError::MissingWorkspaceId)
}

pub fn ae_name(block: &EventBlock<'_>) -> Result<String, FieldError> {
    let url = block
        .line(URL_LINE)
        .ok_or(FieldError::MissingLine(URL_LINE))?;
    let caps = SLUG_RE.captures(url).ok_or(FieldError::NoSchedulingSlug)?;
    Ok(name_from_slug(&caps[1]))
}

/// Build one event. Each field degrades to `""` on its own.
pub fn extract(block: &EventBlock<'_>) -> Event {
    Event {
        timestamp: block.timestamp().to_string(),
        workspace_id: or_empty(block, "workspace_id", workspace_id(block)),
        ae_name: or_empty(block, "ae_name", ae_name(block)),
    }
}

fn or_empty(block: &EventBlock<'_>, field: &str, res: Result<String, FieldError>) -> String {
    res.unwrap_or_else(|err| {
        tracing::debug!(timestamp = block.timestamp(), field, %err, "field left empty");
        String::new()
    })
}
