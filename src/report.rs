use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use utility_billing::{BillEstimate, DualBillEstimate};

pub fn format_dual_bill(dual: &DualBillEstimate) -> String {
    if dual.is_empty() {
        return "Unable to estimate any bills.\n".to_string();
    }

    let mut result = format!(
        "Your estimated bill for {} is\n\n",
        format_date(dual.billing_date())
    );

    if let Some(bill) = dual.electricity() {
        result.push_str("Electricity\n");
        result.push_str("===========\n");
        result.push_str(&format_bill_estimate(bill));
    }

    if dual.electricity().is_some() && dual.gas().is_some() {
        result.push('\n');
    }

    if let Some(bill) = dual.gas() {
        result.push_str("Gas\n");
        result.push_str("===\n");
        result.push_str(&format_bill_estimate(bill));
    }

    result
}

fn format_bill_estimate(bill: &BillEstimate) -> String {
    format!(
        "Usage estimate: {} {}\nPrice estimate: £{:.2}\n(Billing Period {} to {})\n",
        round(bill.usage_estimate(), 0),
        bill.usage_units(),
        round(bill.price_estimate(), 2),
        format_date(bill.period_start()),
        format_date(bill.billing_date()),
    )
}

// Rounding happens only here; the core hands over exact decimals.
fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn bill(usage: Decimal, price: Decimal) -> BillEstimate {
        BillEstimate::new(
            Utc.with_ymd_and_hms(2019, 1, 5, 0, 0, 0).unwrap(),
            Duration::days(4),
            usage,
            "kWh".to_string(),
            price,
        )
    }

    #[test]
    fn test_format_single_bill() {
        let billing_date = Utc.with_ymd_and_hms(2019, 1, 5, 0, 0, 0).unwrap();
        let dual = DualBillEstimate::new(
            billing_date,
            Some(bill(dec!(399.9999999999999999999999999), dec!(715))),
            None,
        );

        assert_eq!(
            format_dual_bill(&dual),
            "Your estimated bill for 05/01/2019 is\n\
             \n\
             Electricity\n\
             ===========\n\
             Usage estimate: 400 kWh\n\
             Price estimate: £715.00\n\
             (Billing Period 01/01/2019 to 05/01/2019)\n"
        );
    }

    #[test]
    fn test_format_both_kinds() {
        let billing_date = Utc.with_ymd_and_hms(2019, 1, 5, 0, 0, 0).unwrap();
        let dual = DualBillEstimate::new(
            billing_date,
            Some(bill(dec!(400), dec!(715))),
            Some(bill(dec!(120), dec!(36.40))),
        );

        let formatted = format_dual_bill(&dual);

        assert!(formatted.contains("Electricity\n===========\n"));
        assert!(formatted.contains("\n\nGas\n===\n"));
        assert!(formatted.contains("£36.40"));
    }

    #[test]
    fn test_format_empty_bill() {
        let billing_date = Utc.with_ymd_and_hms(2019, 1, 5, 0, 0, 0).unwrap();
        let dual = DualBillEstimate::new(billing_date, None, None);

        assert_eq!(format_dual_bill(&dual), "Unable to estimate any bills.\n");
    }

    #[test]
    fn test_rounding_is_half_up() {
        let billing_date = Utc.with_ymd_and_hms(2019, 1, 5, 0, 0, 0).unwrap();
        let dual = DualBillEstimate::new(
            billing_date,
            Some(bill(dec!(0.5), dec!(12.345))),
            None,
        );

        let formatted = format_dual_bill(&dual);

        assert!(formatted.contains("Usage estimate: 1 kWh"));
        assert!(formatted.contains("Price estimate: £12.35"));
    }
}
