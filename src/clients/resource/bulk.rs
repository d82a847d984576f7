//! Encoding of bulk upsert requests and decoding of their responses.
//!
//! A bulk request carries one JSON record per line. The response answers
//! with one JSON object per line, numbered from 1 within the request:
//!
//! ```text
//! {"line":1,"code":"color","status_code":204}
//! {"line":2,"code":"size","status_code":422,"message":"Validation failed.","errors":[...]}
//! ```

use crate::api::{ApiError, Resource, UpsertListItem};

/// Serializes resources as newline-delimited JSON.
pub(crate) fn encode_batch(resources: &[Resource]) -> Result<String, ApiError> {
    let mut body = String::new();
    for resource in resources {
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(&serde_json::to_string(resource)?);
    }
    Ok(body)
}

/// Parses a bulk response, shifting line numbers by `offset`.
///
/// Blank lines are skipped.
pub(crate) fn decode_batch(text: &str, offset: usize) -> Result<Vec<UpsertListItem>, ApiError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut item: UpsertListItem = serde_json::from_str(line)?;
            item.line += offset;
            Ok(item)
        })
        .collect()
}
