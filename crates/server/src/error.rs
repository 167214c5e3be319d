// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use reelbase_api::ApiError;

const INVALID_JSON: &str = "Invalid JSON format in request body";
const INVALID_DATE: &str = "Invalid date format. Use YYYY-MM-DD";
const UNEXPECTED: &str = "An unexpected error occurred. Please try again later.";

/// Query parameters that must parse as integers.
const NUMERIC_QUERY_PARAMS: [&str; 5] = ["genre", "year", "actor", "page", "size"];

/// The body of an error response.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ErrorBody {
    /// A plain-text message.
    Text(String),
    /// A JSON object of field name to message.
    Fields(BTreeMap<String, String>),
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    status: StatusCode,
    body: ErrorBody,
}

impl HttpError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Text(message.into()),
        }
    }

    /// Maps a rejected JSON body to a client message.
    pub fn from_json_rejection(rejection: &JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        match rejection {
            JsonRejection::JsonSyntaxError(_) => Self::bad_request(INVALID_JSON),
            JsonRejection::JsonDataError(err) => {
                let detail: String = err.body_text();
                if detail.contains("birthDate") {
                    Self::bad_request(INVALID_DATE)
                } else {
                    Self::bad_request(format!("Invalid request format: {detail}"))
                }
            }
            other => Self {
                status: other.status(),
                body: ErrorBody::Text(other.body_text()),
            },
        }
    }

    /// Maps a rejected path parameter to a client message.
    pub fn from_path_rejection(rejection: &PathRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected path parameter");
        if let PathRejection::FailedToDeserializePathParams(err) = rejection {
            match err.kind() {
                ErrorKind::ParseErrorAtKey { key, value, .. } => {
                    return Self::bad_request(not_a_number(key, value));
                }
                ErrorKind::ParseError { value, .. }
                | ErrorKind::ParseErrorAtIndex { value, .. } => {
                    return Self::bad_request(not_a_number("id", value));
                }
                _ => {}
            }
        }
        Self {
            status: rejection.status(),
            body: ErrorBody::Text(rejection.body_text()),
        }
    }

    /// Maps a rejected query string to a client message.
    ///
    /// Names the first numeric parameter whose value does not parse, when
    /// there is one.
    pub fn from_query_rejection(rejection: &QueryRejection, raw_query: Option<&str>) -> Self {
        warn!(error = %rejection.body_text(), "Rejected query string");
        let offending: Option<(&str, &str)> = raw_query
            .into_iter()
            .flat_map(|query| query.split('&'))
            .filter_map(|pair| pair.split_once('='))
            .find(|(name, value)| {
                NUMERIC_QUERY_PARAMS.contains(name)
                    && !value.trim().is_empty()
                    && value.trim().parse::<i64>().is_err()
            });

        offending.map_or_else(
            || Self::bad_request(format!("Invalid query parameters: {}", rejection.body_text())),
            |(name, value)| Self::bad_request(not_a_number(name, value)),
        )
    }
}

fn not_a_number(field: &str, value: &str) -> String {
    format!("Invalid value '{value}' for field '{field}'. Expected a valid number")
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self.body {
            ErrorBody::Text(message) => (self.status, message).into_response(),
            ErrorBody::Fields(errors) => (self.status, Json(errors)).into_response(),
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::FieldValidation { errors } => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody::Fields(errors),
            },
            ApiError::InvalidInput { .. }
            | ApiError::DeletionBlocked { .. }
            | ApiError::ConstraintViolation { .. } => Self::bad_request(err.to_string()),
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                body: ErrorBody::Text(err.to_string()),
            },
            ApiError::Internal { message } => {
                error!(%message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorBody::Text(UNEXPECTED.to_string()),
                }
            }
        }
    }
}
