//! HTTP handlers. Each one parses the request, calls the store or catalog,
//! and wraps the result in an [`Envelope`](crate::error::Envelope).

pub mod questions;
pub mod system;

use axum::http::header;
use axum::response::{IntoResponse, Response};

/// A download response with `Content-Disposition: attachment`.
pub(crate) fn attachment(file_name: &str, mime_type: &str, content: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        content,
    )
        .into_response()
}
