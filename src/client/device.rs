//! Simulated iOS client identity
//!
//! The backend only accepts requests that look like they come from the
//! official app, so every request carries the same header bundle.

use http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, AUTHORIZATION, USER_AGENT};

use crate::error::PayPayError;
use crate::types::{AccessToken, ClientUuid, DeviceUuid};

/// Static description of the simulated device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub user_agent: String,
    pub device_name: String,
    pub os_version: String,
    pub system_locale: String,
    pub accept_language: String,
    pub timezone: String,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            user_agent: "PaypayApp/3.31.202202181001 CFNetwork/1126 Darwin/19.5.0".to_string(),
            device_name: "iPad8,3".to_string(),
            os_version: "13.3.1".to_string(),
            system_locale: "ja".to_string(),
            accept_language: "ja-jp".to_string(),
            timezone: "Asia/Tokyo".to_string(),
        }
    }
}

/// Per-session values merged into the header bundle
pub(crate) struct ClientIdentity<'a> {
    pub client_uuid: &'a ClientUuid,
    pub device_uuid: &'a DeviceUuid,
    pub app_version: &'a str,
    pub access_token: Option<&'a AccessToken>,
}

fn value(raw: &str) -> Result<HeaderValue, PayPayError> {
    HeaderValue::from_str(raw).map_err(|e| PayPayError::InvalidHeader(format!("{raw:?}: {e}")))
}

impl DeviceProfile {
    pub(crate) fn headers(&self, identity: &ClientIdentity<'_>) -> Result<HeaderMap, PayPayError> {
        let mut headers = HeaderMap::with_capacity(16);

        headers.insert(USER_AGENT, value(&self.user_agent)?);
        headers.insert(
            HeaderName::from_static("client-type"),
            HeaderValue::from_static("PAYPAYAPP"),
        );
        headers.insert(
            HeaderName::from_static("client-os-type"),
            HeaderValue::from_static("IOS"),
        );
        headers.insert(
            HeaderName::from_static("client-mode"),
            HeaderValue::from_static("NORMAL"),
        );
        headers.insert(
            HeaderName::from_static("network-status"),
            HeaderValue::from_static("WIFI"),
        );
        headers.insert(
            HeaderName::from_static("client-os-version"),
            value(&self.os_version)?,
        );
        headers.insert(
            HeaderName::from_static("client-version"),
            value(identity.app_version)?,
        );
        headers.insert(
            HeaderName::from_static("client-uuid"),
            value(identity.client_uuid.as_str())?,
        );
        headers.insert(
            HeaderName::from_static("device-uuid"),
            value(identity.device_uuid.as_str())?,
        );
        headers.insert(
            HeaderName::from_static("device-name"),
            value(&self.device_name)?,
        );
        headers.insert(
            HeaderName::from_static("system-locale"),
            value(&self.system_locale)?,
        );
        headers.insert(ACCEPT_LANGUAGE, value(&self.accept_language)?);
        headers.insert(HeaderName::from_static("timezone"), value(&self.timezone)?);

        if let Some(token) = identity.access_token {
            let mut bearer = value(&format!("Bearer {}", token.as_str()))?;
            bearer.set_sensitive(true);
            headers.insert(AUTHORIZATION, bearer);
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_without_token() {
        let client_uuid = ClientUuid::new("CLIENT-1").unwrap();
        let device_uuid = DeviceUuid::new("DEVICE-1").unwrap();
        let identity = ClientIdentity {
            client_uuid: &client_uuid,
            device_uuid: &device_uuid,
            app_version: "3.41.1",
            access_token: None,
        };

        let headers = DeviceProfile::default().headers(&identity).unwrap();

        assert_eq!(headers["client-uuid"], "CLIENT-1");
        assert_eq!(headers["device-uuid"], "DEVICE-1");
        assert_eq!(headers["client-version"], "3.41.1");
        assert_eq!(headers["client-type"], "PAYPAYAPP");
        assert_eq!(headers["client-os-type"], "IOS");
        assert_eq!(headers["device-name"], "iPad8,3");
        assert_eq!(headers["timezone"], "Asia/Tokyo");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_headers_with_bearer_token() {
        let client_uuid = ClientUuid::new("CLIENT-1").unwrap();
        let device_uuid = DeviceUuid::new("DEVICE-1").unwrap();
        let token = AccessToken::new("T1").unwrap();
        let identity = ClientIdentity {
            client_uuid: &client_uuid,
            device_uuid: &device_uuid,
            app_version: "3.41.1",
            access_token: Some(&token),
        };

        let headers = DeviceProfile::default().headers(&identity).unwrap();

        assert_eq!(headers[AUTHORIZATION], "Bearer T1");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        let client_uuid = ClientUuid::new("CLIENT\n1").unwrap();
        let device_uuid = DeviceUuid::new("DEVICE-1").unwrap();
        let identity = ClientIdentity {
            client_uuid: &client_uuid,
            device_uuid: &device_uuid,
            app_version: "3.41.1",
            access_token: None,
        };

        let result = DeviceProfile::default().headers(&identity);
        assert!(matches!(result, Err(PayPayError::InvalidHeader(_))));
    }
}
