use reqwest::StatusCode;

/// Why a single outbound call to the bank failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected response body: {0}")]
    Body(String),
}

impl FetchError {
    /// Non-2xx responses keep their body as the detail, capped so a large error
    /// page does not end up in ours.
    pub fn status(status: StatusCode, body: &str) -> Self {
        const MAX_DETAIL: usize = 512;
        let body = body.trim().chars().take(MAX_DETAIL).collect();
        Self::Status { status, body }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Body(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no authorization code was supplied")]
    MissingCode,
    #[error("authorization was refused by the provider: {error}")]
    Denied {
        error: String,
        description: Option<String>,
    },
    #[error("token exchange failed: {0}")]
    TokenExchange(#[source] FetchError),
    #[error("account fetch failed: {0}")]
    AccountFetch(#[source] FetchError),
}

impl Error {
    /// Failures the user can fix by restarting the login flow.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, Self::MissingCode | Self::Denied { .. })
    }
}

pub trait ResultExt<T> {
    fn during_token_exchange(self) -> Result<T, Error>;
    fn during_account_fetch(self) -> Result<T, Error>;
}

impl<T, E: Into<FetchError>> ResultExt<T> for Result<T, E> {
    fn during_token_exchange(self) -> Result<T, Error> {
        self.map_err(|e| Error::TokenExchange(e.into()))
    }
    fn during_account_fetch(self) -> Result<T, Error> {
        self.map_err(|e| Error::AccountFetch(e.into()))
    }
}
