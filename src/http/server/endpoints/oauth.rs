use std::convert::Infallible;
use std::sync::Arc;

use warp::path::FullPath;
use warp::reply::{Reply, Response};
use warp::Filter;

use crate::core::models::RedirectQuery;
use crate::provider::{retrieve_account, AccountsApi};

/// Matches exactly `path`, with or without a trailing slash.
fn at_path(path: Arc<str>) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
    warp::path::full()
        .and_then(move |full: FullPath| {
            let matches = full.as_str().trim_end_matches('/') == &*path;
            async move {
                if matches {
                    Ok(())
                } else {
                    Err(warp::reject::not_found())
                }
            }
        })
        .untuple_one()
}

/// A query we cannot parse (a repeated `code`, for one) is handled like one
/// without a code.
fn redirect_query() -> impl Filter<Extract = (RedirectQuery,), Error = Infallible> + Clone {
    warp::query::<RedirectQuery>().or_else(|rejection: warp::Rejection| async move {
        tracing::debug!(?rejection, "Unparseable redirect query, treating it as empty");
        Ok::<_, Infallible>((RedirectQuery::default(),))
    })
}

/// The provider's redirect target. Always answers with a page: the account
/// summary, or whatever went wrong on the way to it.
pub fn oauth_endpoint<A>(
    api: Arc<A>,
    redirect_path: &str,
) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone
where
    A: AccountsApi + 'static,
{
    let with_api = warp::any().map(move || api.clone());

    at_path(Arc::from(redirect_path))
        .and(warp::get())
        .and(redirect_query())
        .and(with_api)
        .then(|query: RedirectQuery, api: Arc<A>| async move {
            match retrieve_account(&*api, query).await {
                Ok(summary) => summary.into_response(),
                Err(e) => {
                    if e.is_user_recoverable() {
                        tracing::debug!(error = %e, "Redirect could not start the flow");
                    } else {
                        tracing::warn!(error = %e, "Redirect flow failed");
                    }
                    e.into_response()
                }
            }
        })
}
