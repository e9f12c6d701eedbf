//! Flat JSON encoding of a [`UserSession`] for persistence across reloads.
//!
//! ```json
//! {
//!   "type": "credentials",
//!   "credentialBundle": { "clientId": "...", "accessToken": "...", "certificate": "..." },
//!   "renewalToken": "...",
//!   "renewAfter": "2024-03-01T12:09:00Z"
//! }
//! ```
//!
//! Readers ignore top-level keys they do not know, so newer writers can add
//! fields without breaking older blobs.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::credentials::Credentials;
use crate::error::Error;
use crate::session::UserSession;
use crate::types::{RenewalToken, SessionKind};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecordRef<'a> {
    #[serde(rename = "type")]
    kind: SessionKind,
    credential_bundle: &'a Credentials,
    #[serde(skip_serializing_if = "Option::is_none")]
    renewal_token: Option<&'a RenewalToken>,
    #[serde(with = "time::serde::rfc3339")]
    renew_after: OffsetDateTime,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    #[serde(rename = "type")]
    kind: SessionKind,
    credential_bundle: Credentials,
    #[serde(default)]
    renewal_token: Option<RenewalToken>,
    #[serde(with = "time::serde::rfc3339")]
    renew_after: OffsetDateTime,
}

/// Encode every field of `session` as a JSON object.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if encoding fails, which only happens for
/// timestamps outside the RFC 3339 range.
pub fn serialize(session: &UserSession) -> Result<String, Error> {
    let record = SessionRecordRef {
        kind: session.kind,
        credential_bundle: &session.credentials,
        renewal_token: session.renewal_token.as_ref(),
        renew_after: session.renew_after,
    };
    serde_json::to_string(&record).map_err(Error::Serialize)
}

/// Rebuild a session from text produced by [`serialize`].
///
/// # Errors
///
/// Returns [`Error::Deserialize`] if the text is not JSON or lacks one of
/// `type`, `credentialBundle` or `renewAfter`.
pub fn deserialize(text: &str) -> Result<UserSession, Error> {
    let record: SessionRecord = serde_json::from_str(text).map_err(Error::Deserialize)?;
    Ok(UserSession {
        kind: record.kind,
        credentials: record.credential_bundle,
        renewal_token: record.renewal_token,
        renew_after: record.renew_after,
    })
}

impl UserSession {
    /// See [`codec::serialize`](serialize).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if encoding fails.
    pub fn serialize(&self) -> Result<String, Error> {
        serialize(self)
    }

    /// See [`codec::deserialize`](deserialize).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialize`] for unreadable text.
    pub fn deserialize(text: &str) -> Result<Self, Error> {
        deserialize(text)
    }
}
