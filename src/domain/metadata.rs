//! Token URI Resolver
//!
//! A cw721 `token_uri` is free-form: in practice it is either a link
//! (http/ipfs), a base64-encoded JSON blob, or a raw JSON string. This
//! module classifies the string and normalizes it into display-ready JSON
//! with the `tokenId` appended.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde_json::{Map, Value};
use thiserror::Error;

/// Marker value stored under `_nft_type` for link-style metadata
pub const NFT_TYPE_LINK: &str = "link";

/// Decoder that accepts padded and unpadded input alike: on-chain blobs
/// are written by assorted minting tools that do not agree on padding.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors raised while normalizing a `token_uri`
///
/// These are the one failure class this crate does not swallow: a
/// `token_uri` that cannot be parsed means the on-chain data itself is
/// corrupt, which callers need to see.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("token_uri is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token_uri decoded to a non-object JSON value: {0}")]
    NotAnObject(String),
}

/// A classified `token_uri`
///
/// Tagged union rather than an open-ended JSON value so callers can branch
/// on the kind without probing fields; the `Json` variant still carries
/// arbitrary passthrough fields verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTokenUri {
    /// The URI is an external link (contains `"://"`), preserved verbatim
    Link { token_uri: String },
    /// The URI decoded to a JSON object (directly or via base64)
    Json(Map<String, Value>),
}

impl ResolvedTokenUri {
    pub fn is_link(&self) -> bool {
        matches!(self, ResolvedTokenUri::Link { .. })
    }

    /// Produce the final metadata object with `tokenId` appended
    pub fn into_metadata(self, token_id: &str) -> Value {
        let mut object = match self {
            ResolvedTokenUri::Link { token_uri } => {
                let mut object = Map::new();
                object.insert("_nft_type".to_string(), Value::String(NFT_TYPE_LINK.into()));
                object.insert("token_uri".to_string(), Value::String(token_uri));
                object
            }
            ResolvedTokenUri::Json(object) => object,
        };
        object.insert("tokenId".to_string(), Value::String(token_id.to_string()));
        Value::Object(object)
    }
}

/// Classify and decode a raw `token_uri` string.
///
/// Classification order:
/// 1. Contains `"://"` -> a link, returned verbatim.
/// 2. Matches the base64 alphabet (`A-Z a-z 0-9 + / =`) -> base64-decode
///    then JSON-parse; if any step of that fails, fall back to parsing the
///    original string directly as JSON. A URI made entirely of
///    base64-alphabet characters can still be something else.
/// 3. Anything else -> parse directly as JSON.
pub fn resolve_token_uri(token_uri: &str) -> Result<ResolvedTokenUri, MetadataError> {
    if token_uri.contains("://") {
        return Ok(ResolvedTokenUri::Link {
            token_uri: token_uri.to_string(),
        });
    }

    if is_base64_alphabet(token_uri) {
        if let Some(object) = decode_base64_json(token_uri) {
            return Ok(ResolvedTokenUri::Json(object));
        }
        tracing::debug!("token_uri looked like base64 but did not decode, parsing as JSON");
    }

    parse_json_object(token_uri).map(ResolvedTokenUri::Json)
}

fn is_base64_alphabet(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
}

/// Attempt the base64 -> utf8 -> JSON-object chain; None means fall back
fn decode_base64_json(token_uri: &str) -> Option<Map<String, Value>> {
    let decoded = BASE64.decode(token_uri).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    match serde_json::from_str::<Value>(&text).ok()? {
        Value::Object(object) => Some(object),
        _ => None,
    }
}

fn parse_json_object(token_uri: &str) -> Result<Map<String, Value>, MetadataError> {
    match serde_json::from_str::<Value>(token_uri)? {
        Value::Object(object) => Ok(object),
        other => Err(MetadataError::NotAnObject(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_preserved_verbatim() {
        let uri = "ipfs://QmSomeHash/realestate/7.json";
        let resolved = resolve_token_uri(uri).unwrap();
        assert!(resolved.is_link());

        let metadata = resolved.into_metadata("7");
        assert_eq!(metadata["_nft_type"], "link");
        assert_eq!(metadata["token_uri"], uri);
        assert_eq!(metadata["tokenId"], "7");
    }

    #[test]
    fn test_base64_encoded_json() {
        // base64 of {"a":1}
        let resolved = resolve_token_uri("eyJhIjoxfQ==").unwrap();
        let metadata = resolved.into_metadata("10");
        assert_eq!(metadata, json!({"a": 1, "tokenId": "10"}));
    }

    #[test]
    fn test_unpadded_base64_json() {
        // Same blob as above without the trailing padding
        let resolved = resolve_token_uri("eyJhIjoxfQ").unwrap();
        let metadata = resolved.into_metadata("10");
        assert_eq!(metadata, json!({"a": 1, "tokenId": "10"}));
    }

    #[test]
    fn test_raw_json_object() {
        let resolved = resolve_token_uri(r#"{"a":1}"#).unwrap();
        let metadata = resolved.into_metadata("10");
        assert_eq!(metadata, json!({"a": 1, "tokenId": "10"}));
    }

    #[test]
    fn test_raw_json_passthrough_fields() {
        let uri = r#"{"name":"Plot 3","imageLink":"x.png","size":12}"#;
        let metadata = resolve_token_uri(uri).unwrap().into_metadata("3");
        assert_eq!(metadata["name"], "Plot 3");
        assert_eq!(metadata["imageLink"], "x.png");
        assert_eq!(metadata["size"], 12);
        assert_eq!(metadata["tokenId"], "3");
    }

    #[test]
    fn test_base64_alphabet_but_garbage_falls_back() {
        // Valid base64 alphabet, decodes to bytes that are not JSON, and
        // the raw string is not JSON either: the fallback parse error
        // propagates.
        let result = resolve_token_uri("YWJjZA==");
        assert!(matches!(result, Err(MetadataError::Json(_))));
    }

    #[test]
    fn test_empty_string_is_error() {
        assert!(resolve_token_uri("").is_err());
    }

    #[test]
    fn test_non_object_json_is_error() {
        let result = resolve_token_uri(r#"[1,2,3]"#);
        assert!(matches!(result, Err(MetadataError::NotAnObject(_))));
    }

    #[test]
    fn test_base64_of_non_object_falls_back_then_errors() {
        // base64 of the string `42` decodes fine but is not an object, and
        // the raw uri "NDI=" is not JSON.
        let result = resolve_token_uri("NDI=");
        assert!(result.is_err());
    }
}
