use crate::codec;
use crate::error::Error;
use crate::session::{UserSession, user_changed};

/// Holder for the current session, owned by the application's state store.
///
/// Sessions are never edited in place: every sign-in, renewal or sign-out
/// moves a new value (or `None`) into the slot and hands the old one back.
#[derive(Debug, Clone, Default)]
pub struct SessionSlot {
    current: Option<UserSession>,
}

/// Result of [`SessionSlot::replace`].
#[derive(Debug)]
#[must_use]
pub struct SessionChange {
    /// Session that was in the slot before the replacement.
    pub previous: Option<UserSession>,
    /// Whether the identity changed, as decided by [`user_changed`].
    pub user_changed: bool,
}

impl SessionSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&UserSession> {
        self.current.as_ref()
    }

    /// Move `next` into the slot.
    pub fn replace(&mut self, next: Option<UserSession>) -> SessionChange {
        let changed = user_changed(self.current.as_ref(), next.as_ref());
        let previous = std::mem::replace(&mut self.current, next);

        match (&self.current, changed) {
            (Some(session), true) => {
                tracing::info!(user_id = %session.stable_user_id(), kind = %session.kind(), "User signed in");
            }
            (None, true) => tracing::info!("User signed out"),
            (Some(session), false) => {
                tracing::debug!(renew_after = %session.renew_after(), "Session credentials renewed");
            }
            (None, false) => {}
        }

        SessionChange {
            previous,
            user_changed: changed,
        }
    }

    pub fn sign_out(&mut self) -> SessionChange {
        self.replace(None)
    }

    /// Encode the current session for storage. `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the session cannot be encoded.
    pub fn persist(&self) -> Result<Option<String>, Error> {
        self.current.as_ref().map(codec::serialize).transpose()
    }

    /// Rebuild a slot from a stored blob.
    ///
    /// A blob that fails to decode is dropped with a warning and the slot
    /// starts signed out.
    #[must_use]
    pub fn restore(blob: Option<&str>) -> Self {
        let current = blob.and_then(|text| match codec::deserialize(text) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable persisted session");
                None
            }
        });
        Self { current }
    }
}
