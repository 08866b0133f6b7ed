use crate::core::models::AccountSummary;
use crate::http::encoding::reply::{escape_attr, escape_text, Html};
use crate::provider::error::Error;

use url::Url;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};

const PRETTIFY: &str =
    "https://cdn.jsdelivr.net/gh/google/code-prettify@master/loader/run_prettify.js";

impl Reply for AccountSummary {
    fn into_response(self) -> Response {
        match self.to_pretty() {
            Ok(pretty) => Html::new(
                "Account summary",
                format!(
                    "<script src=\"{}\"></script>\n<pre class=\"prettyprint\">{}</pre>",
                    PRETTIFY,
                    escape_text(&pretty)
                ),
            )
            .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render account summary");
                failure_page(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

fn restart_page(reason: Option<String>) -> Response {
    let reason = reason
        .map(|r| format!("<p>{}</p>\n", escape_text(&r)))
        .unwrap_or_default();
    Html::new(
        "Login required",
        format!(
            "<h1>You need to be redirected here from the bank's login page. \
             Please return to <a href=\"/\">the start page</a> to try the OAuth flow again.</h1>\n{}",
            reason
        ),
    )
    .with_status(StatusCode::BAD_REQUEST)
    .into_response()
}

fn failure_page(detail: &str, status: StatusCode) -> Response {
    Html::new(
        "Something went wrong",
        format!(
            "<h1>Something Went Wrong. Try again.</h1>\n<p>Error: {}</p>",
            escape_text(detail)
        ),
    )
    .with_status(status)
    .into_response()
}

impl Reply for Error {
    fn into_response(self) -> Response {
        match self {
            Error::MissingCode => restart_page(None),
            Error::Denied { error, description } => {
                let reason = match description {
                    Some(d) => format!("The bank reported {}: {}", error, d),
                    None => format!("The bank reported {}", error),
                };
                restart_page(Some(reason))
            }
            e @ Error::TokenExchange(_) | e @ Error::AccountFetch(_) => {
                failure_page(&e.to_string(), StatusCode::BAD_GATEWAY)
            }
        }
    }
}

/// Entry page used when no login page file is configured.
pub fn login_page(authorize_url: Option<&Url>) -> Html {
    let body = match authorize_url {
        Some(url) => format!(
            "<h1>Account summary</h1>\n<p><a href=\"{}\">Log in with your bank</a> to view your accounts.</p>",
            escape_attr(url.as_str())
        ),
        None => "<h1>Account summary</h1>\n<p>Log in through your bank to be redirected here with your accounts.</p>"
            .to_string(),
    };
    Html::new("Account summary", body)
}

pub fn status_page(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or("Error");
    Html::new(
        "Error",
        format!(
            "<h1>{} {}</h1>\n<p>Return to <a href=\"/\">the start page</a>.</p>",
            status.as_u16(),
            reason
        ),
    )
    .with_status(status)
    .into_response()
}
