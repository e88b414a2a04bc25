//! Error and result types shared by the resolver and the validators.
//!
//! Two families:
//!
//! - [`ValidationResult`] / [`ValidationError`] describe a request the client got
//!   wrong (unknown URL, disallowed method, missing or mistyped parameter). They are
//!   ordinary values, returned from every call, never stored globally.
//! - [`SpecFault`] describes a broken specification document (dangling `$ref`,
//!   missing `paths`, a node of the wrong shape). The request is not to blame, so
//!   these travel on the `Err` side and should map to a server error in the host.

use http::StatusCode;
use std::fmt;

/// Category of a client-visible validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No documented path (or more than one) matches the request path.
    BadUrl,
    /// The path exists but does not document the request method.
    BadMethod,
    /// A parameter or body field is missing or has the wrong type.
    BadRequest,
}

impl ErrorKind {
    /// Conventional HTTP status for this kind. Informational only.
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::BadUrl => StatusCode::NOT_FOUND,
            ErrorKind::BadMethod => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadUrl => "BAD_URL",
            ErrorKind::BadMethod => "BAD_METHOD",
            ErrorKind::BadRequest => "BAD_REQUEST",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind plus human-readable message for a rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ValidationError {
            kind,
            message: message.into(),
        }
    }

    pub fn bad_url(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadUrl, message)
    }

    pub fn bad_method(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadMethod, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of validating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The failure detail, if any.
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(err) => Some(err),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.error().map(|e| e.kind)
    }

    pub fn message(&self) -> Option<&str> {
        self.error().map(|e| e.message.as_str())
    }
}

/// The specification document itself is broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecFault {
    /// The document has no `paths` mapping.
    MissingPaths,
    /// A node exists but has the wrong shape.
    MalformedNode {
        /// JSON-pointer-like location of the node
        location: String,
        /// What the validator expected to find there
        expected: &'static str,
    },
    /// A `$ref` does not point at an existing entry.
    UnresolvedReference {
        /// The reference string as written in the document
        reference: String,
    },
    /// `$ref` aliases loop back onto themselves without reaching a schema.
    CyclicReference {
        /// Definition names in the order they were visited
        chain: Vec<String>,
    },
    /// A body parameter declares no `schema`.
    MissingBodySchema {
        /// Name of the body parameter
        parameter: String,
    },
}

impl fmt::Display for SpecFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecFault::MissingPaths => {
                write!(f, "specification error: document has no 'paths' mapping")
            }
            SpecFault::MalformedNode { location, expected } => {
                write!(f, "specification error: {location} must be {expected}")
            }
            SpecFault::UnresolvedReference { reference } => {
                write!(f, "specification error: unresolved reference '{reference}'")
            }
            SpecFault::CyclicReference { chain } => {
                write!(
                    f,
                    "specification error: cyclic reference {}",
                    chain.join(" -> ")
                )
            }
            SpecFault::MissingBodySchema { parameter } => {
                write!(
                    f,
                    "specification error: body parameter '{parameter}' has no schema"
                )
            }
        }
    }
}

impl std::error::Error for SpecFault {}

/// Why a check stopped: the request was rejected, or the document is broken.
///
/// Lets the resolver and the checkers short-circuit on either with `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Invalid(ValidationError),
    Fault(SpecFault),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Invalid(err) => err.fmt(f),
            Rejection::Fault(fault) => fault.fmt(f),
        }
    }
}

impl std::error::Error for Rejection {}

impl From<ValidationError> for Rejection {
    fn from(err: ValidationError) -> Self {
        Rejection::Invalid(err)
    }
}

impl From<SpecFault> for Rejection {
    fn from(fault: SpecFault) -> Self {
        Rejection::Fault(fault)
    }
}

pub type Check = Result<(), Rejection>;

/// Fold an internal check into the public shape.
pub(crate) fn finish(check: Check) -> Result<ValidationResult, SpecFault> {
    match check {
        Ok(()) => Ok(ValidationResult::Valid),
        Err(Rejection::Invalid(err)) => Ok(ValidationResult::Invalid(err)),
        Err(Rejection::Fault(fault)) => Err(fault),
    }
}
