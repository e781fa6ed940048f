#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("case not found: {0}")]
    NotFound(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("external source failed: {0}")]
    Source(String),
}

pub type CaseResult<T> = std::result::Result<T, CaseError>;
