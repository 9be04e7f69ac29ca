use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::token;
use crate::{ClientError, ClientResult};

/// Immutable snapshot of the signed-in state: the bearer credential plus the
/// resolved person id used as the key for subsequent fetches. `person_id`
/// stays unset until identity resolution or a session restore supplies it.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub person_id: Option<i32>,
}

/// Session-scoped storage for the current credential and person identity.
///
/// The store hands out immutable `Session` snapshots; all mutation funnels
/// through [`SessionStore::replace`]. Cleared in full on sign-out or when
/// the guard detects an expired credential.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: Mutex<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.inner.lock().expect("session store lock poisoned")
    }

    /// The single mutation entry point. `sign_in`, `set_person_id` and
    /// `clear` all go through here.
    pub fn replace(&self, session: Option<Session>) {
        *self.lock() = session;
    }

    pub fn sign_in(&self, token: String, person_id: Option<i32>) {
        tracing::info!(person_id, "Session stored");
        self.replace(Some(Session { token, person_id }));
    }

    /// Record the person id resolved for the current credential. No-op when
    /// signed out.
    pub fn set_person_id(&self, person_id: Option<i32>) {
        let current = self.current();
        if let Some(session) = current {
            self.replace(Some(Session { person_id, ..session }));
        }
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().clone()
    }

    pub fn person_id(&self) -> Option<i32> {
        self.lock().as_ref().and_then(|session| session.person_id)
    }

    /// Session guard, run before every authenticated action.
    ///
    /// Returns the active session when the stored credential is still live.
    /// When the credential has expired (or cannot be decoded at all) the
    /// store is cleared and `SessionExpired` is returned; the caller must
    /// abort the pending action and route the user to re-authentication.
    pub fn ensure_active(&self) -> ClientResult<Session> {
        let Some(session) = self.current() else {
            return Err(ClientError::Unauthorized("No active session".to_string()));
        };

        let expired = match token::decode_claims(&session.token) {
            Ok(claims) => token::is_expired(&claims, Utc::now()),
            Err(e) => {
                tracing::warn!(error = %e, "Stored credential could not be decoded");
                true
            }
        };

        if expired {
            tracing::warn!("Session expired, clearing stored credential");
            self.clear();
            return Err(ClientError::SessionExpired);
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::issue_test_token;

    #[test]
    fn guard_passes_a_live_session_through() {
        let store = SessionStore::new();
        let token = issue_test_token("jdoe", Utc::now().timestamp() + 3600);
        store.sign_in(token.clone(), Some(4));

        let session = store.ensure_active().unwrap();
        assert_eq!(session.token, token);
        assert_eq!(session.person_id, Some(4));
        assert!(store.current().is_some());
    }

    #[test]
    fn guard_clears_an_expired_session() {
        let store = SessionStore::new();
        let token = issue_test_token("jdoe", Utc::now().timestamp() - 10);
        store.sign_in(token, Some(4));

        assert!(matches!(
            store.ensure_active(),
            Err(ClientError::SessionExpired)
        ));
        // Cleared in full: no credential, no person id left behind
        assert!(store.current().is_none());
        assert_eq!(store.person_id(), None);
    }

    #[test]
    fn guard_treats_garbage_credentials_as_expired() {
        let store = SessionStore::new();
        store.sign_in("not-a-token".to_string(), None);

        assert!(matches!(
            store.ensure_active(),
            Err(ClientError::SessionExpired)
        ));
        assert!(store.current().is_none());
    }

    #[test]
    fn guard_rejects_when_signed_out() {
        let store = SessionStore::new();
        assert!(matches!(
            store.ensure_active(),
            Err(ClientError::Unauthorized(_))
        ));
    }

    #[test]
    fn set_person_id_keeps_the_credential() {
        let store = SessionStore::new();
        let token = issue_test_token("jdoe", Utc::now().timestamp() + 3600);
        store.sign_in(token.clone(), None);

        store.set_person_id(Some(9));
        let session = store.current().unwrap();
        assert_eq!(session.token, token);
        assert_eq!(session.person_id, Some(9));

        // Signed out: nothing to update
        store.clear();
        store.set_person_id(Some(9));
        assert!(store.current().is_none());
    }
}
