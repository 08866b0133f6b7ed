use crate::core::models::{AccessTokenResponse, TokenRequest};
use crate::core::types::{AccessToken, AuthCode};
use crate::provider::error::{Error, FetchError, ResultExt};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{event, Level};

use super::BankProvider;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

impl BankProvider {
    /// Exchanges an authorization code at the token endpoint. One attempt only.
    #[tracing::instrument(skip_all, fields(url = %self.config.token_url))]
    pub async fn access_token_request(&self, code: &AuthCode) -> Result<AccessToken, Error> {
        let config = &self.config;
        let body = serde_urlencoded::to_string(TokenRequest::authorization_code(
            &config.redirect_uri,
            code,
        ))
        .map_err(|e| FetchError::Body(e.to_string()))
        .during_token_exchange()?;

        event!(Level::DEBUG, "Requesting access_token");
        let response = self
            .http
            .post(config.token_url.clone())
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, FORM_URLENCODED)
            .body(body)
            .send()
            .await
            .during_token_exchange()?;

        let status = response.status();
        let text = response.text().await.during_token_exchange()?;

        if !status.is_success() {
            event!(Level::WARN, status = status.as_u16(), "Token endpoint refused the code");
            return Err(Error::TokenExchange(FetchError::status(status, &text)));
        }

        let parsed: AccessTokenResponse = serde_json::from_str(&text).during_token_exchange()?;
        let token = parsed
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| FetchError::Body("response has no access_token".to_string()))
            .during_token_exchange()?;

        event!(
            Level::DEBUG,
            token_type = ?parsed.token_type,
            expires_in = ?parsed.expires_in,
            "Received access_token"
        );
        Ok(AccessToken(token))
    }
}
