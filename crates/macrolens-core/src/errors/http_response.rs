// ABOUTME: axum IntoResponse implementation for AppError
// ABOUTME: Renders the JSON error body with the status derived from the error code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Contributors

use super::{AppError, ErrorCode, ErrorResponse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::{header, HeaderValue, StatusCode};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let challenge = matches!(self.code, ErrorCode::AuthRequired | ErrorCode::AuthInvalid);

        let mut response = (status, Json(ErrorResponse::from(self))).into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
