use super::types::{AuthCode, GrantType, RedirectUri};

/// Form body of the authorization code grant.
#[derive(Debug, serde::Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: GrantType,
    pub redirect_uri: &'a RedirectUri,
    pub code: &'a AuthCode,
}

impl<'a> TokenRequest<'a> {
    pub fn authorization_code(redirect_uri: &'a RedirectUri, code: &'a AuthCode) -> Self {
        Self {
            grant_type: GrantType::AuthorizationCode,
            redirect_uri,
            code,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct AccessTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<serde_json::Value>,
}

/// Query string of the provider's redirect back to us.
#[derive(Debug, Default, serde::Deserialize)]
pub struct RedirectQuery {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Whatever the accounts endpoint returned. No schema is enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary(pub serde_json::Value);

impl AccountSummary {
    pub fn to_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.0)
    }
}
