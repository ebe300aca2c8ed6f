//! Response decoding
//!
//! Picks JSON or text decoding from the `Content-Type` header, turns any
//! status >= 400 into [`VimeoError::Upstream`] carrying the decoded body and
//! maps 204 to `None`.

use reqwest::{header::CONTENT_TYPE, Response, StatusCode};
use serde_json::Value;

use crate::error::{VimeoError, MAX_RESPONSE_SIZE};

/// Decode an upstream response.
pub async fn decode(response: Response) -> Result<Option<Value>, VimeoError> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("text")
        .to_string();

    let bytes = read_with_limit(response).await?;
    decode_body(status, &content_type, &bytes)
}

/// Read a response body, enforcing [`MAX_RESPONSE_SIZE`].
async fn read_with_limit(response: Response) -> Result<Vec<u8>, VimeoError> {
    if let Some(cl) = response.content_length() {
        if cl as usize > MAX_RESPONSE_SIZE {
            return Err(VimeoError::ResponseTooLarge { size: cl });
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > MAX_RESPONSE_SIZE {
        return Err(VimeoError::ResponseTooLarge {
            size: bytes.len() as u64,
        });
    }
    Ok(bytes.to_vec())
}

/// Decode an already-read body.
///
/// Some endpoints double-serialize their payload, so a JSON body that is
/// itself a string is decoded a second time.
pub fn decode_body(
    status: StatusCode,
    content_type: &str,
    bytes: &[u8],
) -> Result<Option<Value>, VimeoError> {
    let is_json = content_type.contains("json");

    if status.as_u16() >= 400 {
        // An unparseable error body still reports the upstream status.
        let payload = if is_json {
            serde_json::from_slice(bytes).unwrap_or_else(|_| as_text(bytes))
        } else {
            as_text(bytes)
        };
        return Err(VimeoError::Upstream { status, payload });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    if !is_json {
        return Ok(Some(as_text(bytes)));
    }

    match serde_json::from_slice::<Value>(bytes)? {
        Value::String(inner) => Ok(Some(serde_json::from_str(&inner)?)),
        data => Ok(Some(data)),
    }
}

fn as_text(bytes: &[u8]) -> Value {
    Value::String(String::from_utf8_lossy(bytes).into_owned())
}
