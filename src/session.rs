use std::future::Future;

use time::{Duration, OffsetDateTime};

use crate::credentials::{CredentialSource, Credentials};
use crate::error::Error;
use crate::expiry;
use crate::identity;
use crate::payload::ProviderPayload;
use crate::types::{ClientId, RenewalToken, SessionKind, UserId};

/// How long before the provider-declared expiry a session asks to be renewed.
pub const RENEWAL_SAFETY_MARGIN: Duration = Duration::minutes(1);

/// Display name used when the credentials carry no client id.
pub const UNKNOWN_USER: &str = "unknown";

/// An authenticated user, whatever the login mechanism.
///
/// Immutable: renewal, re-login and sign-out replace the value (see
/// [`SessionSlot`](crate::SessionSlot)) rather than changing it. Use
/// [`user_changed`] to tell an identity change from a credential refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSession {
    pub(crate) kind: SessionKind,
    pub(crate) credentials: Credentials,
    pub(crate) renewal_token: Option<RenewalToken>,
    pub(crate) renew_after: OffsetDateTime,
}

/// Every field of a [`UserSession`], for callers that already hold them.
///
/// ```rust,ignore
/// let session = UserSession::new(SessionOptions {
///     renewal_token: Some("tok".into()),
///     ..SessionOptions::new(credentials, renew_after)
/// });
/// ```
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub kind: SessionKind,
    pub credentials: Credentials,
    pub renewal_token: Option<RenewalToken>,
    pub renew_after: OffsetDateTime,
}

impl SessionOptions {
    /// Options for a credentials session without a renewal token.
    #[must_use]
    pub fn new(credentials: Credentials, renew_after: OffsetDateTime) -> Self {
        Self {
            kind: SessionKind::Credentials,
            credentials,
            renewal_token: None,
            renew_after,
        }
    }
}

impl UserSession {
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        let SessionOptions {
            kind,
            credentials,
            renewal_token,
            renew_after,
        } = options;
        Self {
            kind,
            credentials,
            renewal_token,
            renew_after,
        }
    }

    /// Build a credentials session from the login provider's payload.
    ///
    /// `renew_after` is set [`RENEWAL_SAFETY_MARGIN`] before `payload.expires`
    /// so renewal happens while the credentials still work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPayload`] if the payload has no `credentials`,
    /// no `expires`, or an `expires` too close to the earliest representable
    /// time to subtract the safety margin from.
    pub fn from_provider_payload(
        renewal_token: Option<RenewalToken>,
        payload: ProviderPayload,
    ) -> Result<Self, Error> {
        let credentials = payload.credentials.ok_or(Error::MalformedPayload {
            field: "credentials",
        })?;
        let expires = payload
            .expires
            .ok_or(Error::MalformedPayload { field: "expires" })?;

        let session = Self {
            kind: SessionKind::Credentials,
            credentials,
            renewal_token,
            renew_after: expires
                .checked_sub(RENEWAL_SAFETY_MARGIN)
                .ok_or(Error::MalformedPayload { field: "expires" })?,
        };

        tracing::debug!(
            client_id = %session.display_name(),
            renew_after = %session.renew_after,
            "Session created from provider payload"
        );

        Ok(session)
    }

    /// Replace this session with one built from a renewal response.
    ///
    /// The mechanism is carried over; everything else comes from the payload.
    ///
    /// # Errors
    ///
    /// Same as [`from_provider_payload`](Self::from_provider_payload).
    pub fn with_renewal(
        self,
        renewal_token: Option<RenewalToken>,
        payload: ProviderPayload,
    ) -> Result<Self, Error> {
        let renewed = Self::from_provider_payload(renewal_token, payload)?;
        Ok(Self {
            kind: self.kind,
            ..renewed
        })
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn renewal_token(&self) -> Option<&RenewalToken> {
        self.renewal_token.as_ref()
    }

    #[must_use]
    pub fn renew_after(&self) -> OffsetDateTime {
        self.renew_after
    }

    /// The user's name: the credentials' client id, or `"unknown"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.credentials
            .client_id()
            .map(ClientId::as_str)
            .filter(|id| !id.is_empty())
            .unwrap_or(UNKNOWN_USER)
    }

    /// User id that stays the same across credential renewals.
    #[must_use]
    pub fn stable_user_id(&self) -> UserId {
        UserId(identity::extract_user_id(self.display_name()).to_owned())
    }

    /// Time left until renewal as seen from `now`, e.g. `"9 minutes"`.
    #[must_use]
    pub fn expires_in_at(&self, now: OffsetDateTime) -> String {
        expiry::describe_remaining(self.renew_after, now)
    }

    /// [`expires_in_at`](Self::expires_in_at) against the current time.
    #[must_use]
    pub fn expires_in(&self) -> String {
        self.expires_in_at(OffsetDateTime::now_utc())
    }

    /// Signed time until `renew_after`; negative once renewal is overdue.
    #[must_use]
    pub fn time_until_renewal_at(&self, now: OffsetDateTime) -> Duration {
        self.renew_after - now
    }

    #[must_use]
    pub fn is_renewal_due_at(&self, now: OffsetDateTime) -> bool {
        now >= self.renew_after
    }

    /// Arguments for constructing Taskcluster API clients.
    ///
    /// Only the credentials; the renewal token never leaves the session.
    #[cfg(feature = "client")]
    #[must_use]
    pub fn client_args(&self) -> crate::client::ClientArgs {
        crate::client::ClientArgs {
            credentials: self.credentials.clone(),
        }
    }
}

impl CredentialSource for UserSession {
    fn fetch_credentials(&self) -> impl Future<Output = Result<Credentials, Error>> + Send {
        std::future::ready(Ok(self.credentials.clone()))
    }
}

/// Whether the signed-in identity differs between two session states.
///
/// Components use this on every sign-in/sign-out event to decide whether to
/// rebuild user-scoped state. A renewal that only swaps the token or the
/// renewal time is not a change.
#[must_use]
pub fn user_changed(previous: Option<&UserSession>, current: Option<&UserSession>) -> bool {
    match (previous, current) {
        (None, None) => false,
        (Some(_), None) | (None, Some(_)) => true,
        (Some(old), Some(new)) => {
            old.kind != new.kind || old.display_name() != new.display_name()
        }
    }
}
