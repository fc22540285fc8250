use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn generate_upper_uuid() -> String {
    Uuid::new_v4().to_string().to_uppercase()
}

/// Installation-scoped client identifier sent as `Client-UUID`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientUuid(String);

impl ClientUuid {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.is_empty() {
            return Err("ClientUuid must not be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generate a fresh uppercase UUID v4
    pub fn generate() -> Self {
        Self(generate_upper_uuid())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Installation-scoped device identifier sent as `Device-UUID`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceUuid(String);

impl DeviceUuid {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.is_empty() {
            return Err("DeviceUuid must not be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generate a fresh uppercase UUID v4
    pub fn generate() -> Self {
        Self(generate_upper_uuid())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// PayPay bearer token
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Result<Self, String> {
        let token = token.into();
        if token.is_empty() {
            return Err("AccessToken must not be empty".to_string());
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}
