use axum::{body::Body, response::Response};
use scraper::{ElementRef, Html, Selector};

pub(crate) async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&body_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// Select the single element matching `selector`, panicking if there are none or many.
#[track_caller]
pub(crate) fn must_select_one<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
    let parsed_selector = Selector::parse(selector).unwrap();
    let elements: Vec<_> = html.select(&parsed_selector).collect();

    assert_eq!(
        elements.len(),
        1,
        "want exactly one element matching {selector:?}, got {}",
        elements.len()
    );

    elements[0]
}

/// The trimmed text of every element matching `selector`, in document order.
pub(crate) fn select_texts(html: &Html, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap();

    html.select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_owned())
        .collect()
}
