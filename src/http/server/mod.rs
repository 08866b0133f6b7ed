use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use warp::Filter;

use crate::provider::AccountsApi;
use crate::util::config::Config;
use crate::util::error::StartupError;

mod endpoints;

use endpoints::{login::login_endpoint, oauth::oauth_endpoint};

use super::encoding::error::handle_reject;
use super::tls::TlsMaterial;

#[derive(Debug)]
pub struct Server<A> {
    api: Arc<A>,
    config: Arc<Config>,
}

impl<A: AccountsApi + 'static> Server<A> {
    pub fn new(api: Arc<A>, config: Arc<Config>) -> Self {
        Self { api, config }
    }

    /// The whole route tree: the redirect target, then the login page for any
    /// other `GET`.
    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
        let redirect = oauth_endpoint(self.api.clone(), &self.config.redirect_path);
        let login = login_endpoint(&self.config.login);

        redirect
            .or(login)
            .unify()
            .recover(handle_reject)
            .with(warp::log("ginko::http"))
    }

    /// Binds and serves until `shutdown` resolves. Bad TLS material or an
    /// address already in use is returned before anything is served.
    pub async fn serve(
        self,
        tls: Option<TlsMaterial>,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), StartupError> {
        let routes = self.routes();
        let addr = self.config.addr;
        let bind_error = |source| StartupError::Bind { addr, source };

        match tls {
            Some(tls) => {
                let (bound, server) = warp::serve(routes)
                    .tls()
                    .cert(tls.cert.as_slice())
                    .key(tls.key.as_slice())
                    .try_bind_with_graceful_shutdown(addr, shutdown)
                    .map_err(bind_error)?;
                tracing::info!(%bound, "Listening on https://{}", bound);
                server.await
            }
            None => {
                let (bound, server) = warp::serve(routes)
                    .try_bind_with_graceful_shutdown(addr, shutdown)
                    .map_err(bind_error)?;
                tracing::warn!(%bound, "Listening on http://{} without TLS", bound);
                server.await
            }
        }
        Ok(())
    }
}
