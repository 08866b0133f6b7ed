use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::core::types::{ClientCredentials, RedirectUri, TrackingId};

/// Process-wide settings, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub token_url: Url,
    pub accounts_url: Url,
    pub redirect_uri: RedirectUri,
    /// Path component of `redirect_uri`, without a trailing slash.
    pub redirect_path: String,
    pub credentials: ClientCredentials,
    pub tracking_id: TrackingId,
    pub addr: SocketAddr,
    pub timeout: Duration,
    pub tls: Option<TlsFiles>,
    pub login: LoginPage,
}

#[derive(Clone)]
pub struct TlsFiles {
    pub cert: PathBuf,
    pub key: PathBuf,
    pub passphrase: Option<String>,
}

impl std::fmt::Debug for TlsFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsFiles")
            .field("cert", &self.cert)
            .field("key", &self.key)
            .field("passphrase", &self.passphrase.as_ref().map(|_| ".."))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum LoginPage {
    File(PathBuf),
    Builtin { authorize_url: Option<Url> },
}
