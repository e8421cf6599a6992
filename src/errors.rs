use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::JsonResponse;

/// SQLite primary result code shared by every constraint violation
/// (FOREIGN KEY, UNIQUE, PRIMARY KEY, NOT NULL, CHECK).
const SQLITE_CONSTRAINT: i32 = 19;

#[derive(Debug)]
pub enum RequestError {
    BadRequest(&'static str),
    NotFound(&'static str),
    InvalidUrl,
    MethodNotAllowed,
    ServerError,
    DatabaseError(sqlx::Error),
}

/// Coarse classification of a [`RequestError`], used to pick the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedRequest,
    NotFound,
    ConstraintViolation,
    MethodNotAllowed,
    Internal,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct RequestErrorJson {
    pub msg: String,
}

impl RequestErrorJson {
    pub fn new(msg: &str) -> RequestErrorJson {
        RequestErrorJson {
            msg: msg.to_string(),
        }
    }
}

impl From<sqlx::Error> for RequestError {
    fn from(value: sqlx::Error) -> Self {
        Self::DatabaseError(value)
    }
}

impl From<JsonRejection> for RequestError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {}", rejection);
        Self::BadRequest("Bad request")
    }
}

impl From<QueryRejection> for RequestError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("rejected query string: {}", rejection);
        Self::BadRequest("Bad request")
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

fn is_constraint_violation(error: &sqlx::Error) -> bool {
    let sqlx::Error::Database(e) = error else {
        return false;
    };
    let by_code = e
        .code()
        .and_then(|code| code.parse::<i32>().ok())
        .map(|code| code & 0xff == SQLITE_CONSTRAINT)
        .unwrap_or(false);
    by_code || e.message().contains("constraint failed")
}

impl RequestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::BadRequest(_) => ErrorKind::MalformedRequest,
            RequestError::NotFound(_) | RequestError::InvalidUrl => ErrorKind::NotFound,
            RequestError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            RequestError::ServerError => ErrorKind::Internal,
            RequestError::DatabaseError(e) if is_constraint_violation(e) => {
                ErrorKind::ConstraintViolation
            }
            RequestError::DatabaseError(_) => ErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::MalformedRequest | ErrorKind::ConstraintViolation => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RequestError::BadRequest(message) | RequestError::NotFound(message) => *message,
            RequestError::InvalidUrl => "Invalid URL",
            RequestError::MethodNotAllowed => "Method not allowed",
            RequestError::DatabaseError(e) if is_constraint_violation(e) => "Bad request",
            RequestError::ServerError | RequestError::DatabaseError(_) => {
                "Internal server error"
            }
        }
    }

    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJson> {
        match (self.kind(), self) {
            (ErrorKind::Internal, RequestError::DatabaseError(e)) => {
                tracing::error!("Database error: {}", e);
            }
            (ErrorKind::Internal, _) => tracing::error!("Internal server error"),
            (ErrorKind::ConstraintViolation, RequestError::DatabaseError(e)) => {
                tracing::debug!("constraint violation: {}", e);
            }
            _ => {}
        }
        (self.status_code(), Json(RequestErrorJson::new(self.message())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_their_status() {
        let cases = [
            (RequestError::BadRequest("Bad request"), StatusCode::BAD_REQUEST),
            (RequestError::NotFound("Id not found"), StatusCode::NOT_FOUND),
            (RequestError::InvalidUrl, StatusCode::NOT_FOUND),
            (RequestError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (RequestError::ServerError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{error:?}");
        }
    }

    #[test]
    fn invalid_url_and_method_not_allowed_stay_distinct() {
        assert_eq!(RequestError::InvalidUrl.kind(), ErrorKind::NotFound);
        assert_eq!(
            RequestError::MethodNotAllowed.kind(),
            ErrorKind::MethodNotAllowed
        );
        assert_ne!(
            RequestError::InvalidUrl.message(),
            RequestError::NotFound("Id not found").message()
        );
    }

    #[test]
    fn unclassified_database_errors_do_not_leak() {
        let error = RequestError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.kind(), ErrorKind::Internal);
        assert_eq!(error.message(), "Internal server error");
        let (status, Json(body)) = error.to_json_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.msg, "Internal server error");
    }
}
