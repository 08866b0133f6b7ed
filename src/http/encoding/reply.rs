use warp::http::StatusCode;
use warp::reply::Response;

/// A complete HTML document.
pub struct Html {
    status: StatusCode,
    title: &'static str,
    body: String,
}

impl Html {
    pub fn new(title: &'static str, body: String) -> Self {
        Self {
            status: StatusCode::OK,
            title,
            body,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl warp::reply::Reply for Html {
    fn into_response(self) -> Response {
        let document = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            self.title, self.body
        );
        let mut response = Response::new(document.into());
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            "content-type",
            warp::http::header::HeaderValue::from_static("text/html; charset=utf-8"),
        );
        response
    }
}

/// Escapes text placed inside an element. Quotes are left alone.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes text placed inside a quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_text(s)
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::Reply;

    #[test]
    fn text_escaping_keeps_quotes() {
        assert_eq!(
            escape_text(r#"<a href="x">Tom & 'Jerry'</a>"#),
            r#"&lt;a href="x"&gt;Tom &amp; 'Jerry'&lt;/a&gt;"#
        );
    }

    #[test]
    fn attribute_escaping_covers_quotes() {
        assert_eq!(
            escape_attr(r#"/?a="b"&c='d'"#),
            "/?a=&quot;b&quot;&amp;c=&#x27;d&#x27;"
        );
    }

    #[test]
    fn html_reply_sets_status_and_type() {
        let response = Html::new("t", "<p>hi</p>".to_string())
            .with_status(StatusCode::BAD_GATEWAY)
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers()["content-type"],
            "text/html; charset=utf-8"
        );
    }
}
