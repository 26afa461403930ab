use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    #[error("need at least two readings to extrapolate usage")]
    InsufficientData,
    #[error("the two latest readings were taken within the same second")]
    DegenerateInterval,
    #[error("cumulative reading decreased between the two latest readings")]
    NonMonotonicReading,
    #[error("billing date {0} is before the reading it would be billed from")]
    FutureReadingViolation(DateTime<Utc>),
    #[error("readings mix unit labels: {0:?}")]
    InconsistentUnits(Vec<String>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    #[error("usage estimation failed: {0}")]
    Estimate(#[from] EstimateError),
    #[error("no member named '{0}'")]
    UnknownMember(String),
    #[error("no account named '{0}'")]
    UnknownAccount(String),
}
