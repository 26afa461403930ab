use crate::data_structures::{
    Account, BillEstimate, DataRoot, DualBillEstimate, DualTariff, Tariff, UtilityKind,
};
use crate::error::{BillingError, EstimateError};
use crate::estimator::{LinearExtrapolationEstimator, UsageEstimator};
use crate::pricing::PriceCalculator;
use chrono::{DateTime, Utc};
use tracing::warn;

pub struct BillAssembler {
    estimator: Box<dyn UsageEstimator>,
    calculator: PriceCalculator,
}

impl BillAssembler {
    pub fn new() -> Self {
        Self::with_estimator(Box::new(LinearExtrapolationEstimator::new()))
    }

    pub fn with_estimator(estimator: Box<dyn UsageEstimator>) -> Self {
        Self {
            estimator,
            calculator: PriceCalculator::new(),
        }
    }

    /// `Ok(None)` when the account has no readings of this kind; an account
    /// without gas service is not an error.
    pub fn estimate_kind(
        &self,
        account: &Account,
        kind: UtilityKind,
        tariff: &Tariff,
        billing_date: DateTime<Utc>,
    ) -> Result<Option<BillEstimate>, EstimateError> {
        let readings = account.readings(kind);
        if readings.is_empty() {
            return Ok(None);
        }

        let usage_estimate = self.estimator.estimate_usage(readings, billing_date)?;
        Ok(Some(self.calculator.bill_estimate(&usage_estimate, tariff)))
    }

    /// Fails on the first kind that cannot be estimated.
    pub fn assemble(
        &self,
        account: &Account,
        tariffs: &DualTariff,
        billing_date: DateTime<Utc>,
    ) -> Result<DualBillEstimate, BillingError> {
        let electricity = self.estimate_kind(
            account,
            UtilityKind::Electricity,
            tariffs.electricity(),
            billing_date,
        )?;
        let gas = self.estimate_kind(account, UtilityKind::Gas, tariffs.gas(), billing_date)?;

        Ok(DualBillEstimate::new(billing_date, electricity, gas))
    }

    /// A kind that fails estimation is dropped from the result and reported
    /// alongside it; the sibling kind is still estimated.
    pub fn assemble_partial(
        &self,
        account: &Account,
        tariffs: &DualTariff,
        billing_date: DateTime<Utc>,
    ) -> (DualBillEstimate, Vec<(UtilityKind, EstimateError)>) {
        let mut failures = Vec::new();
        let mut estimate = |kind: UtilityKind| {
            match self.estimate_kind(account, kind, tariffs.tariff(kind), billing_date) {
                Ok(bill) => bill,
                Err(error) => {
                    warn!(
                        account = account.name(),
                        kind = kind.name(),
                        %error,
                        "skipping bill estimate"
                    );
                    failures.push((kind, error));
                    None
                }
            }
        };

        let electricity = estimate(UtilityKind::Electricity);
        let gas = estimate(UtilityKind::Gas);

        (
            DualBillEstimate::new(billing_date, electricity, gas),
            failures,
        )
    }

    pub fn assemble_for_member_account(
        &self,
        data_root: &DataRoot,
        member_name: &str,
        account_name: &str,
        tariffs: &DualTariff,
        billing_date: DateTime<Utc>,
    ) -> Result<DualBillEstimate, BillingError> {
        let account = lookup_account(data_root, member_name, account_name)?;
        self.assemble(account, tariffs, billing_date)
    }
}

impl Default for BillAssembler {
    fn default() -> Self {
        Self::new()
    }
}

pub fn lookup_account<'a>(
    data_root: &'a DataRoot,
    member_name: &str,
    account_name: &str,
) -> Result<&'a Account, BillingError> {
    let member = data_root
        .member(member_name)
        .ok_or_else(|| BillingError::UnknownMember(member_name.to_string()))?;
    member
        .account(account_name)
        .ok_or_else(|| BillingError::UnknownAccount(account_name.to_string()))
}
