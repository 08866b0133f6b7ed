use crate::core::models::AccountSummary;
use crate::core::types::AccessToken;
use crate::provider::error::{Error, FetchError, ResultExt};

use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::{event, Level};

use super::BankProvider;

impl BankProvider {
    /// Fetches the account summary with a bearer token. One attempt only.
    #[tracing::instrument(skip_all, fields(url = %self.config.accounts_url))]
    pub async fn account_request(&self, token: &AccessToken) -> Result<AccountSummary, Error> {
        let config = &self.config;

        let response = self
            .http
            .get(config.accounts_url.clone())
            .header(AUTHORIZATION, token.bearer())
            .header("uuid", config.tracking_id.to_string())
            .header(ACCEPT, "application/json")
            .header("client_id", &config.credentials.client_id.0)
            .send()
            .await
            .during_account_fetch()?;

        let status = response.status();
        let text = response.text().await.during_account_fetch()?;

        if !status.is_success() {
            event!(Level::WARN, status = status.as_u16(), "Accounts endpoint refused the token");
            return Err(Error::AccountFetch(FetchError::status(status, &text)));
        }

        let value: serde_json::Value = serde_json::from_str(&text).during_account_fetch()?;
        Ok(AccountSummary(value))
    }
}
