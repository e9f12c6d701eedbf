use serde::Deserialize;
use time::OffsetDateTime;

use crate::credentials::Credentials;
use crate::error::Error;

/// Body the login provider returns after a successful authentication.
///
/// Both fields are optional at the parsing level so a payload missing one of
/// them is reported as [`Error::MalformedPayload`] by
/// [`UserSession::from_provider_payload`](crate::UserSession::from_provider_payload)
/// rather than as an opaque JSON error.
#[derive(Debug, Clone, Default, Deserialize)]
#[non_exhaustive]
pub struct ProviderPayload {
    /// When the credentials stop being valid.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires: Option<OffsetDateTime>,
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

impl ProviderPayload {
    #[must_use]
    pub fn new(expires: OffsetDateTime, credentials: Credentials) -> Self {
        Self {
            expires: Some(expires),
            credentials: Some(credentials),
        }
    }

    /// Parse the provider's JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPayloadJson`] if the body is not valid JSON
    /// or a present field has the wrong shape.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body).map_err(Error::MalformedPayloadJson)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_parses_full_payload() {
        let payload = ProviderPayload::from_json(
            r#"{"expires":"2024-03-01T12:10:00Z","credentials":{"clientId":"c","accessToken":"t"}}"#,
        )
        .unwrap();
        assert_eq!(payload.expires, Some(datetime!(2024-03-01 12:10 UTC)));
        assert_eq!(
            payload.credentials.unwrap().client_id.map(String::from).as_deref(),
            Some("c")
        );
    }

    #[test]
    fn test_missing_fields_parse_as_none() {
        let payload = ProviderPayload::from_json(r#"{"expires":"2024-03-01T12:10:00Z"}"#).unwrap();
        assert!(payload.credentials.is_none());

        let payload = ProviderPayload::from_json(r#"{"credentials":{"clientId":"c"}}"#).unwrap();
        assert!(payload.expires.is_none());
    }

    #[test]
    fn test_bad_json_is_malformed() {
        let err = ProviderPayload::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::MalformedPayloadJson(_)));

        let err = ProviderPayload::from_json(r#"{"expires":"yesterday"}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedPayloadJson(_)));
    }
}
