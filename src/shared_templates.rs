//! Helpers for turning rendered markup into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Render;

/// Render `template` as an HTML response with the given `status_code`.
///
/// Accepts anything that implements [maud::Render], including [maud::Markup].
pub fn render(status_code: StatusCode, template: impl Render) -> Response {
    (status_code, template.render()).into_response()
}
