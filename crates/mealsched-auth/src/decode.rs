//! Lenient, key-free token payload decoding.
//!
//! # Design
//! - Never fails on payload shape: missing segments or non-JSON payloads yield an
//!   empty claim set so callers can always fall back to an anonymous state.
//! - The only error is a payload segment that is not base64url at all.
//! - Loosely typed JSON values are resolved to string claims here and nowhere else.
//! - A JSON array becomes one claim per non-empty element, for any claim name.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::{Map, Value};
use tracing::debug;

use crate::claims::{ClaimSet, ROLE_CLAIM};
use crate::error::{TokenError, TokenResult};

const SEGMENT_DELIMITER: char = '.';

const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Role value as found in a payload, before flattening into claims.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ClaimValue {
    Single(String),
    Many(Vec<String>),
}

/// Decode the claims of `token` without verifying its signature.
///
/// Tokens with fewer than two segments, or whose payload is not a JSON object,
/// decode to an empty claim set.
///
/// # Errors
///
/// Returns [`TokenError::MalformedToken`] when the payload segment is not base64url.
pub fn decode_claims(token: &str) -> TokenResult<ClaimSet> {
    let mut segments = token.split(SEGMENT_DELIMITER);
    let (Some(_header), Some(payload)) = (segments.next(), segments.next()) else {
        return Ok(ClaimSet::new());
    };

    let bytes = PAYLOAD_ENGINE
        .decode(payload)
        .map_err(|source| TokenError::MalformedToken { source })?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(object)) => Ok(claims_from_payload(object)),
        Ok(_) => {
            debug!("token payload is not a JSON object");
            Ok(ClaimSet::new())
        }
        Err(err) => {
            debug!(error = %err, "token payload is not JSON");
            Ok(ClaimSet::new())
        }
    }
}

/// Flatten a decoded payload object into string claims.
pub(crate) fn claims_from_payload(mut payload: Map<String, Value>) -> ClaimSet {
    let mut claims = ClaimSet::new();

    match payload.remove(ROLE_CLAIM).as_ref().and_then(role_value) {
        Some(ClaimValue::Single(role)) => claims.insert(ROLE_CLAIM, role),
        Some(ClaimValue::Many(roles)) => {
            for role in roles {
                claims.insert(ROLE_CLAIM, role);
            }
        }
        None => {}
    }

    for (name, value) in payload {
        match value {
            Value::Array(items) => {
                for text in items.iter().filter_map(string_form) {
                    claims.insert(name.clone(), text);
                }
            }
            other => {
                if let Some(text) = string_form(&other) {
                    claims.insert(name, text);
                }
            }
        }
    }
    claims
}

fn role_value(value: &Value) -> Option<ClaimValue> {
    let text = string_form(value)?;
    let trimmed = text.trim();
    if trimmed.starts_with('[')
        && trimmed.ends_with(']')
        && let Ok(items) = serde_json::from_str::<Vec<Value>>(trimmed)
    {
        return Some(ClaimValue::Many(
            items.iter().filter_map(string_form).collect(),
        ));
    }
    Some(ClaimValue::Single(text))
}

fn string_form(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
