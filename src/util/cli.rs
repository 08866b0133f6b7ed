use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::core::types::{ClientCredentials, RedirectUri, ResponseType, TrackingId};

use super::config::{Config, LoginPage, TlsFiles};
use super::error::StartupError;

#[derive(Debug, Parser)]
#[clap(
    name = "ginkod",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Options {
    /// Token endpoint the authorization code is exchanged at
    #[clap(long, env = "TOKEN_URL")]
    token_url: Url,
    /// Protected endpoint returning the account summary
    #[clap(long, env = "ACCOUNTS_URL")]
    accounts_url: Url,
    /// Redirect URI registered with the provider; its path is where we listen for the redirect
    #[clap(long, env = "REDIRECT_URI")]
    redirect_uri: Url,
    #[clap(long, env = "CLIENT_ID")]
    client_id: String,
    #[clap(long, env = "CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,
    /// Sent as the `uuid` header on account requests
    #[clap(long, env = "TRACKING_UUID")]
    tracking_uuid: uuid::Uuid,
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,
    #[clap(long, env = "PORT", default_value = "3000")]
    port: u16,
    /// Timeout applied to each outbound request
    #[clap(long, env = "HTTP_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,
    #[clap(long, env = "TLS_CERT")]
    tls_cert: Option<PathBuf>,
    #[clap(long, env = "TLS_KEY")]
    tls_key: Option<PathBuf>,
    #[clap(long, env = "TLS_KEY_PASSPHRASE", hide_env_values = true)]
    tls_key_passphrase: Option<String>,
    /// HTML file served as the login entry page
    #[clap(long, env = "LOGIN_PAGE")]
    login_page: Option<PathBuf>,
    /// Provider login page linked from the built-in entry page
    #[clap(long, env = "AUTHORIZE_URL")]
    authorize_url: Option<Url>,
    #[clap(long, env = "SCOPE")]
    scope: Option<String>,
}

fn authorize_link(
    mut authorize_url: Url,
    credentials: &ClientCredentials,
    redirect_uri: &RedirectUri,
    scope: Option<&str>,
) -> Url {
    #[derive(serde::Serialize)]
    struct AuthorizeParams<'a> {
        response_type: ResponseType,
        client_id: &'a str,
        redirect_uri: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        scope: Option<&'a str>,
    }

    let params = AuthorizeParams {
        response_type: ResponseType::Code,
        client_id: credentials.client_id.as_ref(),
        redirect_uri: &redirect_uri.0,
        scope,
    };
    // Only strings and a unit variant, which always encode.
    if let Ok(qs) = serde_urlencoded::to_string(&params) {
        let pairs = url::form_urlencoded::parse(qs.as_bytes());
        authorize_url.query_pairs_mut().extend_pairs(pairs);
    }
    authorize_url
}

fn redirect_path(uri: &Url) -> Result<String, StartupError> {
    let path = uri.path().trim_end_matches('/');
    if path.is_empty() {
        return Err(StartupError::Options(format!(
            "redirect URI {} must have a path other than /",
            uri
        )));
    }
    Ok(path.to_string())
}

impl Options {
    pub fn into_config(self) -> Result<Config, StartupError> {
        let tls = match (self.tls_cert, self.tls_key, self.tls_key_passphrase) {
            (Some(cert), Some(key), passphrase) => Some(TlsFiles {
                cert,
                key,
                passphrase,
            }),
            (None, None, None) => None,
            (None, None, Some(_)) => {
                return Err(StartupError::Options(
                    "--tls-key-passphrase requires --tls-key".to_string(),
                ))
            }
            _ => {
                return Err(StartupError::Options(
                    "--tls-cert and --tls-key must be given together".to_string(),
                ))
            }
        };

        let credentials = ClientCredentials::new(self.client_id, self.client_secret);
        let redirect_path = redirect_path(&self.redirect_uri)?;
        let redirect_uri = RedirectUri(self.redirect_uri.to_string());

        let scope = self.scope;
        let login = match (self.login_page, self.authorize_url) {
            (Some(path), _) => LoginPage::File(path),
            (None, authorize_url) => LoginPage::Builtin {
                authorize_url: authorize_url
                    .map(|u| authorize_link(u, &credentials, &redirect_uri, scope.as_deref())),
            },
        };

        Ok(Config {
            token_url: self.token_url,
            accounts_url: self.accounts_url,
            credentials,
            redirect_uri,
            redirect_path,
            tracking_id: TrackingId(self.tracking_uuid),
            addr: SocketAddr::new(self.host, self.port),
            timeout: Duration::from_secs(self.timeout_secs),
            tls,
            login,
        })
    }
}
