use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde_json::{Map, Value};

// Token payloads are usually unpadded; accept both forms.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The decoded payload of a bearer token. The signature is never checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    values: Map<String, Value>,
}

impl Claims {
    pub fn sub(&self) -> Option<&str> {
        self.values.get("sub").and_then(Value::as_str)
    }

    /// Expiry in seconds since the epoch. Fractional values are truncated.
    pub fn exp(&self) -> Option<i64> {
        match self.values.get("exp")? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// Reads the claims out of a compact `header.payload.signature` token.
///
/// Every failure (no token, no payload segment, bad base64, non-UTF-8, not a
/// JSON object) collapses to `None`.
pub fn decode_claims(token: Option<&str>) -> Option<Claims> {
    let payload = token?.split('.').nth(1)?;

    let standard = payload.replace('-', "+").replace('_', "/");
    let bytes = PAYLOAD_ENGINE.decode(standard).ok()?;
    let text = String::from_utf8(bytes).ok()?;

    match serde_json::from_str::<Value>(&text).ok()? {
        Value::Object(values) => Some(Claims { values }),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use base64::prelude::BASE64_URL_SAFE_NO_PAD;

    use super::*;

    pub fn token_with_payload(payload: &Value) -> String {
        let header = BASE64_URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = BASE64_URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn test_decode_sub_and_exp() {
        let token = token_with_payload(&serde_json::json!({
            "sub": "admin@example.com",
            "exp": 1_900_000_000,
        }));

        let claims = decode_claims(Some(&token)).expect("claims");
        assert_eq!(claims.sub(), Some("admin@example.com"));
        assert_eq!(claims.exp(), Some(1_900_000_000));
    }

    #[test]
    fn test_decode_url_safe_alphabet() {
        // "???" and ">>>" encode to '/' and '+' in the standard alphabet
        let token = token_with_payload(&serde_json::json!({ "sub": "???>>>" }));
        assert!(token.contains('_') || token.contains('-'));

        let claims = decode_claims(Some(&token)).expect("claims");
        assert_eq!(claims.sub(), Some("???>>>"));
    }

    #[test]
    fn test_decode_padded_payload() {
        let payload = base64::prelude::BASE64_URL_SAFE.encode(r#"{"exp":1}"#);
        let token = format!("h.{payload}.s");

        let claims = decode_claims(Some(&token)).expect("claims");
        assert_eq!(claims.exp(), Some(1));
    }

    #[test]
    fn test_decode_unicode_subject() {
        let token = token_with_payload(&serde_json::json!({ "sub": "zoë" }));
        let claims = decode_claims(Some(&token)).expect("claims");
        assert_eq!(claims.sub(), Some("zoë"));
    }

    #[test]
    fn test_malformed_tokens_yield_no_claims() {
        let not_json = format!("h.{}.s", BASE64_URL_SAFE_NO_PAD.encode("not json"));
        let not_object = format!("h.{}.s", BASE64_URL_SAFE_NO_PAD.encode("[1,2,3]"));
        let not_utf8 = format!("h.{}.s", BASE64_URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]));

        for token in [
            "",
            "no-dots-at-all",
            "header.",
            "header.!!!not-base64!!!.sig",
            not_json.as_str(),
            not_object.as_str(),
            not_utf8.as_str(),
        ] {
            assert_eq!(decode_claims(Some(token)), None, "token {token:?}");
        }

        assert_eq!(decode_claims(None), None);
    }

    #[test]
    fn test_exp_of_wrong_type_is_absent() {
        let token = token_with_payload(&serde_json::json!({ "exp": "tomorrow" }));
        let claims = decode_claims(Some(&token)).expect("claims");
        assert_eq!(claims.exp(), None);
    }
}
