use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::Error;
use crate::types::ClientId;

/// Taskcluster credential bundle as handed out by the login provider.
///
/// Treated as opaque: only `clientId` is interpreted. Keys this crate does not
/// know about are kept in `extra` so the bundle survives a persist/restore
/// cycle unchanged.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<JsonValue>,
    /// Temporary-credential certificate, absent for permanent credentials.
    ///
    /// Providers send it either as JSON text or as an already decoded object;
    /// both are kept as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<JsonValue>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Credentials {
    /// Create a bundle with only the client id set.
    #[must_use]
    pub fn new(client_id: impl Into<ClientId>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(JsonValue::String(access_token.into()));
        self
    }

    #[must_use]
    pub fn with_certificate(mut self, certificate: impl Into<JsonValue>) -> Self {
        self.certificate = Some(certificate.into());
        self
    }

    /// Client id, if the provider supplied one.
    #[must_use]
    pub fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    /// Whether these are temporary credentials (carry a certificate).
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.certificate.is_some()
    }
}

// Signing material stays out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("access_token", &self.access_token.as_ref().map(|_| ".."))
            .field("certificate", &self.certificate.as_ref().map(|_| ".."))
            .field("extra_keys", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Something that can produce Taskcluster credentials for the signed-in user.
///
/// Asynchronous so that session kinds which have to go over the network to
/// mint credentials fit behind the same call.
pub trait CredentialSource: Send + Sync {
    /// Load the credentials for this user.
    ///
    /// # Errors
    ///
    /// Implementations that fetch remotely report failures here. Sessions
    /// that already hold their credentials never fail.
    fn fetch_credentials(&self) -> impl Future<Output = Result<Credentials, Error>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_provider_shape() {
        let creds: Credentials = serde_json::from_str(
            r#"{"clientId":"mozilla-auth0/u1/bugzilla-dashboard-x","accessToken":"tok","certificate":"{}"}"#,
        )
        .unwrap();
        assert_eq!(
            creds.client_id().map(ClientId::as_str),
            Some("mozilla-auth0/u1/bugzilla-dashboard-x")
        );
        assert_eq!(creds.access_token, Some(serde_json::json!("tok")));
        assert!(creds.is_temporary());
        assert!(creds.extra.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let json = r#"{"clientId":"c","accessToken":"t","scopes":["a","b"]}"#;
        let creds: Credentials = serde_json::from_str(json).unwrap();
        assert_eq!(creds.extra.get("scopes"), Some(&serde_json::json!(["a", "b"])));

        let back = serde_json::to_value(&creds).unwrap();
        assert_eq!(back["scopes"], serde_json::json!(["a", "b"]));
        assert_eq!(back["clientId"], "c");
        assert!(back.get("certificate").is_none());
    }

    #[test]
    fn test_object_certificate_is_accepted() {
        let json = r#"{"clientId":"c","accessToken":"t","certificate":{"version":1,"seed":"abc"}}"#;
        let creds: Credentials = serde_json::from_str(json).unwrap();
        assert!(creds.is_temporary());
        assert_eq!(
            creds.certificate,
            Some(serde_json::json!({"version": 1, "seed": "abc"}))
        );

        let back = serde_json::to_value(&creds).unwrap();
        assert_eq!(back["certificate"]["version"], 1);
    }

    #[test]
    fn test_client_id_may_be_absent() {
        let creds: Credentials = serde_json::from_str(r#"{"accessToken":"t"}"#).unwrap();
        assert!(creds.client_id().is_none());
        assert!(!creds.is_temporary());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::new("c")
            .with_access_token("very-secret")
            .with_certificate("cert-body");
        let out = format!("{creds:?}");
        assert!(!out.contains("very-secret"));
        assert!(!out.contains("cert-body"));
        assert!(out.contains("ClientId(\"c\")"));
    }
}
