// Copyright (C) 2020-2025  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! [Error] adapter for the [axum] web framework.
//!
//! This module implements [`axum::response::IntoResponse`] for [`Error`], so that handlers can
//! return [`crate::Result`] directly.  The response carries only the code, the safe message and
//! the details of the error; the log text and the stack trace never leave the process.
//!
//! Codes outside of the `common.*` namespace are mapped to `500 Internal Server Error`.  Use
//! [`into_axum_response_with`] to map domain codes as well.

pub use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::{Code, Error};

/// Get the [HTTP Status Code][StatusCode] for the reserved `common.*` codes.
pub fn http_status_code(code: &Code) -> StatusCode {
    match code.as_str() {
        "common.not-found" => StatusCode::NOT_FOUND,
        "common.invalid-argument" => StatusCode::BAD_REQUEST,
        "common.unauthorized" => StatusCode::UNAUTHORIZED,
        "common.forbidden" => StatusCode::FORBIDDEN,
        "common.already-exists" => StatusCode::CONFLICT,
        "common.unavailable" => StatusCode::SERVICE_UNAVAILABLE,
        "common.timeout" => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert the [`Error`] to [`axum::response::Response`] with a custom status mapping.
pub fn into_axum_response_with<F>(error: Error, status: F) -> axum::response::Response
where
    F: FnOnce(&Code) -> StatusCode,
{
    (status(error.code()), axum::Json(response_body(&error))).into_response()
}

fn response_body(error: &Error) -> serde_json::Value {
    let details: Vec<_> = error.details().iter().map(|detail| detail.to_json()).collect();

    serde_json::json!({
        "code": error.code().as_str(),
        "message": error.message(),
        "details": details,
    })
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        into_axum_response_with(self, http_status_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Detail;

    #[test]
    fn test_http_status_code() {
        assert_eq!(http_status_code(&Code::NOT_FOUND), StatusCode::NOT_FOUND);
        assert_eq!(
            http_status_code(&Code::INVALID_ARGUMENT),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            http_status_code(&Code::INTERNAL),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            http_status_code(&Code::from("user.banned")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_body_is_safe() {
        let cause = Error::with_log("db.query", "query failed", "password=hunter2");
        let error = Error::wrap(cause, Code::INVALID_ARGUMENT, "invalid request")
            .with_detail(Detail::new("name", "Name is empty"));

        let body = response_body(&error);
        assert_eq!(
            body,
            serde_json::json!({
                "code": "common.invalid-argument",
                "message": "invalid request",
                "details": [{"field": "name", "message": "Name is empty"}],
            })
        );
        assert!(!body.to_string().contains("hunter2"));
    }

    #[test]
    fn test_into_response() {
        let response = Error::new(Code::UNAUTHORIZED, "log in first").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = into_axum_response_with(Error::new("user.banned", "banned"), |code| {
            if code == "user.banned" {
                StatusCode::FORBIDDEN
            } else {
                http_status_code(code)
            }
        });
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
