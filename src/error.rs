//! Defines the app level error type and its mapping onto HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// The errors that may occur while serving a request.
///
/// Every variant maps onto exactly one HTTP status code via
/// [Error::status_code]. All error responses have empty bodies, the only
/// non-empty error body in the API is the router fallback's `Not Found`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request body could not be parsed as a JSON object.
    ///
    /// This maps to 404 rather than the conventional 400. The original API
    /// contract responds 404 to unparsable bodies and clients depend on it,
    /// so the quirk is kept.
    #[error("the request body is not a JSON object")]
    MalformedBody,

    /// A required transaction field is absent, null, or empty.
    #[error("the field \"{0}\" is missing or empty")]
    MissingField(&'static str),

    /// `valor` is zero, negative, or not an integer.
    #[error("\"valor\" must be a strictly positive integer")]
    InvalidAmount,

    /// `tipo` is something other than `"c"` or `"d"`.
    #[error("\"tipo\" must be either \"c\" or \"d\"")]
    InvalidTransactionKind,

    /// `descricao` is longer than 10 characters.
    #[error("\"descricao\" must be between 1 and 10 characters long")]
    InvalidDescription,

    /// No customer exists with the requested ID.
    ///
    /// Also returned for path IDs that do not parse as a positive integer,
    /// which are indistinguishable from unknown customers to the client.
    #[error("the customer could not be found")]
    CustomerNotFound,

    /// The database refused the transaction, typically because applying it
    /// would push the balance below the overdraft limit.
    #[error("the transaction was rejected by the database")]
    TransactionRejected,

    /// An unexpected database error outside the stored procedure call.
    ///
    /// The inner error is logged server-side and never shown to the client.
    #[error("an unexpected database error occurred: {0}")]
    Database(#[from] sqlx::Error),
}

impl Error {
    /// The HTTP status code this error responds with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MalformedBody | Error::CustomerNotFound => StatusCode::NOT_FOUND,
            Error::MissingField(_)
            | Error::InvalidAmount
            | Error::InvalidTransactionKind
            | Error::InvalidDescription
            | Error::TransactionRejected => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if let Error::Database(error) = &self {
            tracing::error!("an unhandled database error occurred: {error}");
        }

        self.status_code().into_response()
    }
}
