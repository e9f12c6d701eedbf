use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Taskcluster client identifier, e.g. `mozilla-auth0/ad|Mozilla-LDAP|someone/bugzilla-dashboard-x`.
///
/// Sole source of identity for a session. The composite form is decoded by
/// [`extract_user_id`](crate::identity::extract_user_id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Stable user identifier derived from a [`ClientId`].
///
/// Survives credential renewal: two client ids issued to the same subject for
/// different dashboards map to the same `UserId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque token handed back to the provider to obtain fresh credentials.
///
/// Not identity-bearing. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, From, Into)]
#[serde(transparent)]
pub struct RenewalToken(pub String);

impl RenewalToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RenewalToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::fmt::Debug for RenewalToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RenewalToken(..)")
    }
}

/// Authentication mechanism a session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Long-lived Taskcluster credential bundle.
    #[display("credentials")]
    Credentials,
    /// Interactive federated login.
    #[display("oidc")]
    Oidc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&SessionKind::Credentials).unwrap(),
            "\"credentials\""
        );
        assert_eq!(serde_json::to_string(&SessionKind::Oidc).unwrap(), "\"oidc\"");
        let parsed: SessionKind = serde_json::from_str("\"oidc\"").unwrap();
        assert_eq!(parsed, SessionKind::Oidc);
    }

    #[test]
    fn test_session_kind_display_matches_wire() {
        assert_eq!(SessionKind::Credentials.to_string(), "credentials");
        assert_eq!(SessionKind::Oidc.to_string(), "oidc");
    }

    #[test]
    fn test_client_id_is_transparent() {
        let id = ClientId::from("mozilla-auth0/u1/bugzilla-dashboard-x");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"mozilla-auth0/u1/bugzilla-dashboard-x\""
        );
        assert_eq!(id.to_string(), "mozilla-auth0/u1/bugzilla-dashboard-x");
    }

    #[test]
    fn test_renewal_token_debug_is_redacted() {
        let token = RenewalToken::from("s3cret");
        assert_eq!(format!("{token:?}"), "RenewalToken(..)");
        assert_eq!(token.as_str(), "s3cret");
    }

    #[test]
    fn test_user_id_from_string() {
        let id = UserId::from("u1".to_string());
        assert_eq!(id.to_string(), "u1");
        assert_eq!(String::from(id), "u1");
    }
}
