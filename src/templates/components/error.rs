use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, DOCTYPE};

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => render_error(404, "Not Found", None),

        ServerError::BadRequest(msg) => render_error(400, &msg, None),

        ServerError::Operation { error, details } => render_error(500, &error, Some(&details)),

        ServerError::Internal(msg) => render_error(500, "Internal Server Error", Some(&msg)),
    }
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str, details: Option<&str>) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                style {
                    "body { font-family: system-ui, sans-serif; max-width: 720px; margin: 4rem auto; padding: 1rem; }"
                    "h1 { font-size: 2rem; margin-bottom: 1rem; }"
                    "p { font-size: 1.1rem; color: #444; }"
                    "code { background: #f4f4f4; padding: 0.2rem 0.4rem; border-radius: 6px; }"
                }
            }
            body {
                h1 { "Error " (status) }
                p { (message) }
                @if let Some(details) = details {
                    p { code { (details) } }
                }
                p { a href="/" { "← Back to home" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
