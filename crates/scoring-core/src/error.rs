use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Sector table has no \"{0}\" row")]
    MissingDefaultSector(String),

    #[error("Invalid metric value: {0}")]
    InvalidMetric(String),
}
