pub mod assembler;
pub mod data_structures;
pub mod error;
pub mod estimator;
pub mod loader;
pub mod pricing;
pub mod validation;

pub use assembler::BillAssembler;
pub use data_structures::{
    Account, BillEstimate, DataRoot, DualBillEstimate, DualTariff, Member, Reading, Tariff,
    UsageEstimate, UtilityKind,
};
pub use error::{BillingError, EstimateError};
pub use estimator::{LinearExtrapolationEstimator, UsageEstimator};
pub use loader::DataLoader;
pub use pricing::PriceCalculator;
pub use validation::{validate_account, validate_readings, Violation};

pub use anyhow::Result;
pub use chrono::{DateTime, Duration, Utc};
pub use rust_decimal::Decimal;

pub mod prelude {
    pub use crate::assembler::BillAssembler;
    pub use crate::data_structures::{DualBillEstimate, DualTariff, UtilityKind};
    pub use crate::estimator::LinearExtrapolationEstimator;
    pub use crate::loader::DataLoader;
    pub use anyhow::Result;
    pub use chrono::{DateTime, Utc};
}
