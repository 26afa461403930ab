use crate::data_structures::{BillEstimate, Tariff, UsageEstimate};
use chrono::Duration;
use rust_decimal::Decimal;

const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

pub struct PriceCalculator;

impl PriceCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Standing charge for each whole day of the period plus the unit charge
    /// for the estimated usage. A partial final day accrues no standing
    /// charge.
    pub fn calculate_price(
        &self,
        time_period: Duration,
        usage: Decimal,
        tariff: &Tariff,
    ) -> Decimal {
        let standing_price = Decimal::from(floored_days(time_period)) * tariff.standing_charge();
        let unit_price = usage * tariff.unit_charge();

        standing_price + unit_price
    }

    pub fn bill_estimate(&self, usage_estimate: &UsageEstimate, tariff: &Tariff) -> BillEstimate {
        BillEstimate::new(
            usage_estimate.billing_date(),
            usage_estimate.time_period(),
            usage_estimate.usage_estimate(),
            usage_estimate.usage_units().to_string(),
            self.calculate_price(
                usage_estimate.time_period(),
                usage_estimate.usage_estimate(),
                tariff,
            ),
        )
    }
}

impl Default for PriceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn floored_days(time_period: Duration) -> i64 {
    time_period.num_seconds() / SECONDS_PER_DAY
}
