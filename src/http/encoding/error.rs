use std::convert::Infallible;

use crate::http::response::status_page;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

/// Every rejection ends in an HTML page, so the route tree never fails.
pub async fn handle_reject(err: Rejection) -> Result<impl Reply, Infallible> {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        StatusCode::METHOD_NOT_ALLOWED
    } else {
        tracing::warn!(rejection = ?err, "Unhandled rejection");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok(status_page(status))
}
