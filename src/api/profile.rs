//! PayPay Profile API

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::common::authorized_payload;
use crate::api::r#trait::{PayPayApi, PayPayContext};
use crate::error::PayPayError;

const PROFILE_PATH: &str = "/bff/v2/getProfileDisplayInfo";

/// Account details of the signed-in user
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub avatar_image_url: Option<String>,
    #[serde(default)]
    pub external_user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub mail_address: Option<String>,
    #[serde(default)]
    pub is_already_set_password: bool,
    #[serde(default)]
    pub is_already_set_passcode: bool,
    #[serde(default)]
    pub has_wallet: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_merchant_store: bool,
}

/// Payload of getProfileDisplayInfo
///
/// The icon and menu lists drive the app's UI and are kept as raw JSON.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub user_profile: UserProfile,
    #[serde(default)]
    pub my_icon_list: Vec<serde_json::Value>,
    #[serde(default)]
    pub profile_group_list: Vec<serde_json::Value>,
}

/// PayPay profile API
pub struct ProfileApi {
    context: Arc<PayPayContext>,
}

impl ProfileApi {
    /// Create a new ProfileApi instance
    pub fn new(context: Arc<PayPayContext>) -> Self {
        Self { context }
    }

    /// GET /bff/v2/getProfileDisplayInfo
    pub async fn get_profile(&self) -> Result<Profile, PayPayError> {
        let result = self.context.authorized_get(PROFILE_PATH).await?;
        authorized_payload(result)
    }
}

impl PayPayApi for ProfileApi {
    fn context(&self) -> &PayPayContext {
        &self.context
    }

    fn api_name(&self) -> &'static str {
        "profile"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parse() {
        let json = r#"{
            "myIconList": [{"id": "1"}],
            "profileGroupList": [],
            "userProfile": {
                "avatarImageUrl": null,
                "externalUserId": "EXT1",
                "displayName": "Taro",
                "phoneNumber": "09012345678",
                "hasWallet": true,
                "kycInfo": {}
            }
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user_profile.external_user_id, "EXT1");
        assert_eq!(profile.user_profile.display_name.as_deref(), Some("Taro"));
        assert!(profile.user_profile.has_wallet);
        assert!(profile.user_profile.avatar_image_url.is_none());
        assert_eq!(profile.my_icon_list.len(), 1);
    }
}
