//! Error types for the vPIC client.
//!
//! # Design
//! Input problems are caught before a request is built and reported as
//! `ApiError::Validation`. Everything that goes wrong after the request
//! leaves the client (connection, status, body) is a transport-level
//! variant. Batch decoding gets its own two variants so callers can tell a
//! misbehaving API apart from a malformed request.

use thiserror::Error;

use crate::config::{EARLIEST_MODEL_YEAR, MAX_VIN_LEN};

/// Errors returned by the client, the endpoint facade and table export.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input was rejected before any network call.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The configured base URL could not be turned into a request URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP round-trip itself failed (DNS, connection, TLS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body was not a vPIC JSON envelope.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// A single-entity decode came back with an empty `Results` array.
    #[error("{operation} returned no results")]
    MissingResult { operation: &'static str },

    /// A batch decode returned a different number of results than VINs sent.
    #[error("batch decode returned {returned} results for {requested} VINs")]
    BatchIntegrity { requested: usize, returned: usize },

    /// A batch decode failed while executing or parsing the call.
    #[error("batch decode failed: {0}")]
    BatchDecode(Box<ApiError>),

    /// Writing a table as CSV failed.
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

impl ApiError {
    /// True for the two batch-specific failure kinds.
    pub fn is_batch_error(&self) -> bool {
        matches!(self, ApiError::BatchIntegrity { .. } | ApiError::BatchDecode(_))
    }
}

/// Whether a validation failure concerns the shape of an argument or its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Type,
    Value,
}

/// Reasons an argument is rejected before a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{field}' must be {expected}, got {got:?}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        got: String,
    },

    #[error("model year {0} is before {earliest}, the earliest year the API supports", earliest = EARLIEST_MODEL_YEAR)]
    ModelYearTooEarly(i32),

    #[error("VIN {vin:?} is {len} characters, at most {max} are allowed", max = MAX_VIN_LEN)]
    VinTooLong { vin: String, len: usize },

    #[error("VIN {0:?} contains a batch separator (',' or ';')")]
    VinSeparator(String),

    #[error("WMI {wmi:?} is {len} characters, expected 3 or 6")]
    WmiLength { wmi: String, len: usize },

    #[error("'{0}' must not be empty")]
    Empty(&'static str),

    #[error("cannot filter by '{first}' and '{second}' at the same time")]
    ConflictingFilters {
        first: &'static str,
        second: &'static str,
    },

    #[error("cannot filter by '{field}' without '{requires}'")]
    MissingPrerequisite {
        field: &'static str,
        requires: &'static str,
    },

    #[error("{0:?} is not a manufacturer type")]
    UnknownManufacturerType(String),

    #[error("page numbers start at 1")]
    PageZero,

    #[error("batch decode needs at least one VIN")]
    EmptyBatch,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationKind {
        match self {
            ValidationError::WrongType { .. } => ValidationKind::Type,
            _ => ValidationKind::Value,
        }
    }
}
