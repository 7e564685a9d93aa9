//! Thordata API response decoding.

use base64::Engine;
use bytes::Bytes;
use serde_json::{Map, Value};

use super::ThordataError;

/// Body returned by the Universal scraping API once unwrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapePayload {
    /// Textual body (HTML).
    Text(String),
    /// Binary body (screenshot bytes).
    Binary(Bytes),
}

impl ScrapePayload {
    pub fn len(&self) -> usize {
        match self {
            ScrapePayload::Text(s) => s.len(),
            ScrapePayload::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode a SERP API body into its JSON object.
///
/// Application-level failures reported with HTTP 200 become
/// `ThordataError::Api`.
pub fn parse_serp(body: &[u8]) -> Result<Map<String, Value>, ThordataError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ThordataError::Parse(e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(ThordataError::Parse("SERP response is not a JSON object".into()));
    };

    check_envelope(&map)?;
    Ok(map)
}

/// Decode a Universal API body given its Content-Type.
///
/// `text/*` bodies are always text, with invalid UTF-8 replaced. Untyped
/// bodies are text only when they are valid UTF-8.
pub fn parse_universal(content_type: Option<&str>, body: Bytes) -> Result<ScrapePayload, ThordataError> {
    let content_type = content_type.unwrap_or_default().to_ascii_lowercase();

    if content_type.starts_with("image/") {
        return Ok(ScrapePayload::Binary(body));
    }

    if content_type.contains("json") {
        let value: Value = serde_json::from_slice(&body).map_err(|e| ThordataError::Parse(e.to_string()))?;
        return parse_universal_envelope(value);
    }

    if content_type.starts_with("text/") {
        return Ok(ScrapePayload::Text(String::from_utf8_lossy(&body).into_owned()));
    }

    match String::from_utf8(body.to_vec()) {
        Ok(text) => Ok(ScrapePayload::Text(text)),
        Err(_) => Ok(ScrapePayload::Binary(body)),
    }
}

fn parse_universal_envelope(value: Value) -> Result<ScrapePayload, ThordataError> {
    let Value::Object(map) = value else {
        return Err(ThordataError::Parse("universal response is not a JSON object".into()));
    };

    check_envelope(&map)?;

    if let Some(html) = map.get("html") {
        return match html {
            Value::String(s) => Ok(ScrapePayload::Text(s.clone())),
            _ => Err(ThordataError::Parse("`html` field is not a string".into())),
        };
    }

    if let Some(png) = map.get("png") {
        let Value::String(encoded) = png else {
            return Err(ThordataError::Parse("`png` field is not a string".into()));
        };
        return decode_png(encoded).map(ScrapePayload::Binary);
    }

    Err(ThordataError::Parse("universal response has neither `html` nor `png`".into()))
}

/// Decode a base64 screenshot, with or without a `data:` URI prefix.
fn decode_png(encoded: &str) -> Result<Bytes, ThordataError> {
    let data = match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };

    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map(Bytes::from)
        .map_err(|e| ThordataError::Parse(format!("invalid base64 png: {e}")))
}

/// Reject envelopes whose `code` is not 200 or that carry an `error` field.
fn check_envelope(map: &Map<String, Value>) -> Result<(), ThordataError> {
    let message = || {
        ["msg", "message", "error"]
            .iter()
            .find_map(|k| map.get(*k))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "unknown error".to_string())
    };

    if let Some(code) = map.get("code") {
        let code = code
            .as_i64()
            .or_else(|| code.as_str().and_then(|s| s.parse().ok()))
            .ok_or_else(|| ThordataError::Parse(format!("unexpected `code` value: {code}")))?;
        if code != 200 {
            return Err(ThordataError::Api { code, message: message() });
        }
    }

    if map.get("error").is_some_and(|e| !e.is_null()) {
        return Err(ThordataError::Api { code: 200, message: message() });
    }

    Ok(())
}
