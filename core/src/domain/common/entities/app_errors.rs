use thiserror::Error;

/// Error taxonomy shared by every domain service.
///
/// Expected misses (product not in catalog, adapter without data) are
/// represented as `Option`, never as errors. The variants here cover the
/// genuinely exceptional conditions and the recoverable degradations the
/// ingestion pipeline reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The classifier could not be reached (network, auth, timeout).
    #[error("classifier unavailable: {0}")]
    ClassificationUnavailable(String),

    /// The classifier answered, but the payload was not interpretable.
    #[error("classifier returned malformed output: {0}")]
    ClassificationMalformed(String),

    /// An external product data source is down or answered garbage.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// A product with the same UPC already exists. Callers treat this as a
    /// normal `skipped` outcome, not a failure.
    #[error("product with this UPC code already exists")]
    DuplicateProduct,

    /// The user already holds an allergy record overlapping this one.
    #[error("an overlapping allergy is already recorded")]
    DuplicateAllergy,

    /// An import record is missing required fields.
    #[error("invalid candidate: {0}")]
    InvalidCandidate(String),

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("not found")]
    NotFound,

    #[error("internal server error")]
    InternalServerError,
}
