//! Session state for one PayPay client instance
//!
//! Holds the simulated installation identifiers, the bearer token and the
//! cached app version. The token is written only by a successful login or
//! OTP completion; concurrent logins on one instance are last-write-wins.

use std::sync::{PoisonError, RwLock};

use crate::types::{AccessToken, ClientUuid, DeviceUuid};

/// Fallback used until a version lookup succeeds.
pub const FALLBACK_APP_VERSION: &str = "3.41.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

pub struct Session {
    client_uuid: ClientUuid,
    device_uuid: DeviceUuid,
    access_token: RwLock<Option<AccessToken>>,
    app_version: RwLock<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("client_uuid", &self.client_uuid)
            .field("device_uuid", &self.device_uuid)
            .field("state", &self.state())
            .field("app_version", &self.app_version())
            .finish()
    }
}

impl Session {
    pub fn new(
        client_uuid: ClientUuid,
        device_uuid: DeviceUuid,
        access_token: Option<AccessToken>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            client_uuid,
            device_uuid,
            access_token: RwLock::new(access_token),
            app_version: RwLock::new(app_version.into()),
        }
    }

    pub fn client_uuid(&self) -> &ClientUuid {
        &self.client_uuid
    }

    pub fn device_uuid(&self) -> &DeviceUuid {
        &self.device_uuid
    }

    pub fn access_token(&self) -> Option<AccessToken> {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub(crate) fn set_access_token(&self, token: AccessToken) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn app_version(&self) -> String {
        self.app_version
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn set_app_version(&self, version: impl Into<String>) {
        *self
            .app_version
            .write()
            .unwrap_or_else(PoisonError::into_inner) = version.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous_session() -> Session {
        Session::new(
            ClientUuid::generate(),
            DeviceUuid::generate(),
            None,
            FALLBACK_APP_VERSION,
        )
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let session = anonymous_session();
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());
        assert_eq!(session.app_version(), FALLBACK_APP_VERSION);
    }

    #[test]
    fn test_resumed_session_is_authenticated() {
        let session = Session::new(
            ClientUuid::generate(),
            DeviceUuid::generate(),
            Some(AccessToken::new("resumed").unwrap()),
            FALLBACK_APP_VERSION,
        );
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.access_token().unwrap().as_str(), "resumed");
    }

    #[test]
    fn test_set_access_token_last_write_wins() {
        let session = anonymous_session();
        session.set_access_token(AccessToken::new("first").unwrap());
        session.set_access_token(AccessToken::new("second").unwrap());
        assert_eq!(session.access_token().unwrap().as_str(), "second");
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_set_app_version() {
        let session = anonymous_session();
        session.set_app_version("4.10.0");
        assert_eq!(session.app_version(), "4.10.0");
    }

    #[test]
    fn test_debug_does_not_print_token() {
        let session = Session::new(
            ClientUuid::new("CLIENT").unwrap(),
            DeviceUuid::new("DEVICE").unwrap(),
            Some(AccessToken::new("secret_bearer").unwrap()),
            FALLBACK_APP_VERSION,
        );
        let printed = format!("{:?}", session);
        assert!(!printed.contains("secret_bearer"));
        assert!(printed.contains("Authenticated"));
    }
}
