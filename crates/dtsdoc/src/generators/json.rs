use chrono::Utc;
use serde::Serialize;

use crate::{error::Result, model::DocEntry};

/// Pretty-printed JSON representation of a merged entry list including metadata.
pub fn render_json(entries: &[DocEntry]) -> Result<String> {
    let payload = JsonPayload {
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now().to_rfc3339(),
        entries,
    };

    Ok(serde_json::to_string_pretty(&payload)?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonPayload<'a> {
    version: &'static str,
    generated_at: String,
    entries: &'a [DocEntry],
}
