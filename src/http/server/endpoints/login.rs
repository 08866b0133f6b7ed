use warp::filters::BoxedFilter;
use warp::reply::{Reply, Response};
use warp::Filter;

use crate::http::response::login_page;
use crate::util::config::LoginPage;

/// Serves the entry page for any `GET` the redirect endpoint did not take.
pub fn login_endpoint(page: &LoginPage) -> BoxedFilter<(Response,)> {
    match page {
        LoginPage::File(path) => warp::get()
            .and(warp::fs::file(path.clone()))
            .map(|file: warp::fs::File| file.into_response())
            .boxed(),
        LoginPage::Builtin { authorize_url } => {
            let authorize_url = authorize_url.clone();
            warp::get()
                .map(move || login_page(authorize_url.as_ref()).into_response())
                .boxed()
        }
    }
}
