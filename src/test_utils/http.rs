use axum::{body::Body, http::StatusCode, response::Response};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    let status = response.status();

    assert_eq!(status, StatusCode::OK, "want 200 OK, got {status}");
}

#[track_caller]
fn get_header<'a>(response: &'a Response<Body>, header_name: &str) -> &'a str {
    let Some(value) = response.headers().get(header_name) else {
        panic!("response has no {header_name} header");
    };

    value
        .to_str()
        .unwrap_or_else(|error| panic!("{header_name} header is not ASCII: {error}"))
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    assert_eq!(get_header(response, "content-type"), content_type);
}

/// Check that htmx will send the client to `url`.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, url: &str) {
    assert_eq!(get_header(response, "hx-redirect"), url);
}
