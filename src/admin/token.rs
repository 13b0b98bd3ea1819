use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Body of a successful `/auth/user/emailpass` call.
///
/// The backend answers `{"token": "..."}`. `access_token` and `jwt` are
/// accepted as well, in that order of preference.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub access_token: Option<String>,
    pub jwt: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Strings at most this long are never taken for a token.
const FALLBACK_MIN_CHARS: usize = 20;

impl LoginResponse {
    /// The bearer token carried by this response.
    ///
    /// When none of the known fields is set, the first string field longer
    /// than twenty characters is used and a warning is logged.
    pub fn into_token(self) -> Option<String> {
        let known = [self.token, self.access_token, self.jwt]
            .into_iter()
            .flatten()
            .find(|token| !token.is_empty());
        if known.is_some() {
            return known;
        }

        let (field, token) = self.other.into_iter().find_map(|(field, value)| match value {
            Value::String(text) if text.chars().count() > FALLBACK_MIN_CHARS => Some((field, text)),
            _ => None,
        })?;
        warn!(%field, "login response has no token field, using long string field");
        Some(token)
    }
}

/// Decodes a login response body and extracts its bearer token.
pub fn resolve_token(body: &str) -> Result<Option<String>, serde_json::Error> {
    let response: LoginResponse = serde_json::from_str(body)?;
    Ok(response.into_token())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_field_wins() {
        let body = r#"{"user":"admin@suedpfote.de-with-a-long-name","token":"abc"}"#;
        assert_eq!(resolve_token(body).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn known_fields_in_priority_order() {
        let body = r#"{"jwt":"third","access_token":"second"}"#;
        assert_eq!(resolve_token(body).unwrap().as_deref(), Some("second"));

        let body = r#"{"token":"","jwt":"third"}"#;
        assert_eq!(resolve_token(body).unwrap().as_deref(), Some("third"));
    }

    #[test]
    fn falls_back_to_first_long_string() {
        let body = r#"{"ok":true,"short":"tiny","session":"eyJhbGciOiJIUzI1NiJ9.payload","other":"zzzzzzzzzzzzzzzzzzzzzzzzzzzz"}"#;
        assert_eq!(
            resolve_token(body).unwrap().as_deref(),
            Some("eyJhbGciOiJIUzI1NiJ9.payload")
        );
    }

    #[test]
    fn exactly_twenty_chars_is_not_enough() {
        let body = r#"{"session":"12345678901234567890"}"#;
        assert_eq!(resolve_token(body).unwrap(), None);
    }

    #[test]
    fn non_json_is_an_error() {
        assert!(resolve_token("<html>Bad Gateway</html>").is_err());
    }
}
