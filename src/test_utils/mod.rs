#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod store;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, body_text, must_select_one, parse_html_document, parse_html_fragment, select_texts,
};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok};
pub(crate) use store::{get_test_state, get_test_state_with};
