use crate::core::models::{AccountSummary, RedirectQuery};
use crate::core::types::{AccessToken, AuthCode};
use crate::util::config::Config;
use crate::util::error::StartupError;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{event, Level};

pub mod accounts;
pub mod error;
pub mod token;

use error::Error;

/// The two calls the redirect handler makes against the bank.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    async fn exchange_code(&self, code: &AuthCode) -> Result<AccessToken, Error>;
    async fn fetch_account(&self, token: &AccessToken) -> Result<AccountSummary, Error>;
}

#[derive(Debug)]
pub struct BankProvider {
    http: reqwest::Client,
    config: Arc<Config>,
    /// `Basic ...` value for the token endpoint, computed once.
    authorization: String,
}

impl BankProvider {
    pub fn new(config: Arc<Config>) -> Result<Self, StartupError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ginko/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: reqwest::Client, config: Arc<Config>) -> Self {
        let authorization = config.credentials.authorization_header();
        Self {
            http,
            config,
            authorization,
        }
    }
}

#[async_trait]
impl AccountsApi for BankProvider {
    async fn exchange_code(&self, code: &AuthCode) -> Result<AccessToken, Error> {
        self.access_token_request(code).await
    }

    async fn fetch_account(&self, token: &AccessToken) -> Result<AccountSummary, Error> {
        self.account_request(token).await
    }
}

/// Runs the redirect flow: code in, account summary out. The account fetch only
/// starts once the token exchange has returned.
#[tracing::instrument(skip_all)]
pub async fn retrieve_account<A>(api: &A, query: RedirectQuery) -> Result<AccountSummary, Error>
where
    A: AccountsApi + ?Sized,
{
    let code = match AuthCode::non_empty(query.code) {
        Some(code) => code,
        None => {
            return Err(match query.error {
                Some(error) => {
                    event!(Level::INFO, %error, "Provider redirected with an error");
                    Error::Denied {
                        error,
                        description: query.error_description,
                    }
                }
                None => {
                    event!(Level::DEBUG, "Redirect without an authorization code");
                    Error::MissingCode
                }
            });
        }
    };

    let token = api.exchange_code(&code).await?;
    let summary = api.fetch_account(&token).await?;

    event!(Level::INFO, "Retrieved account summary");
    Ok(summary)
}
