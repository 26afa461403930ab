use crate::data_structures::{Reading, UsageEstimate};
use crate::error::EstimateError;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

/// Strategy for projecting usage out to a billing date.
pub trait UsageEstimator {
    fn estimate_usage(
        &self,
        readings: &[Reading],
        billing_date: DateTime<Utc>,
    ) -> Result<UsageEstimate, EstimateError>;
}

/// Extends the line between the two latest readings out to the billing date.
///
/// Works on whole seconds, so it is a poor fit for readings taken moments
/// apart.
pub struct LinearExtrapolationEstimator;

impl LinearExtrapolationEstimator {
    pub fn new() -> Self {
        Self
    }
}

impl UsageEstimator for LinearExtrapolationEstimator {
    fn estimate_usage(
        &self,
        readings: &[Reading],
        billing_date: DateTime<Utc>,
    ) -> Result<UsageEstimate, EstimateError> {
        let (initial, latest) = latest_two_readings(readings)?;

        let seconds = time_difference_seconds(initial, latest)?;
        let usage_difference = usage_difference(initial, latest)?;
        let rate = Decimal::from(usage_difference) / Decimal::from(seconds);

        // The period is measured from the earlier of the two readings used
        // for the rate, not from the first reading in the series.
        let time_period = billing_period(initial, billing_date)?;
        let usage_estimate = rate * Decimal::from(time_period.num_seconds());

        let usage_units = usage_units(readings)?;

        Ok(UsageEstimate::new(
            billing_date,
            time_period,
            usage_estimate,
            usage_units,
        ))
    }
}

impl Default for LinearExtrapolationEstimator {
    fn default() -> Self {
        Self::new()
    }
}

fn latest_two_readings(readings: &[Reading]) -> Result<(&Reading, &Reading), EstimateError> {
    if readings.len() < 2 {
        return Err(EstimateError::InsufficientData);
    }

    let mut ordered: Vec<&Reading> = readings.iter().collect();
    ordered.sort_by_key(|reading| reading.timestamp());

    Ok((ordered[ordered.len() - 2], ordered[ordered.len() - 1]))
}

fn time_difference_seconds(initial: &Reading, latest: &Reading) -> Result<i64, EstimateError> {
    let seconds = (latest.timestamp() - initial.timestamp()).num_seconds();
    if seconds == 0 {
        return Err(EstimateError::DegenerateInterval);
    }

    Ok(seconds)
}

fn usage_difference(initial: &Reading, latest: &Reading) -> Result<u64, EstimateError> {
    if latest.cumulative() < initial.cumulative() {
        return Err(EstimateError::NonMonotonicReading);
    }

    Ok(latest.cumulative() - initial.cumulative())
}

fn billing_period(
    initial: &Reading,
    billing_date: DateTime<Utc>,
) -> Result<Duration, EstimateError> {
    let time_period = billing_date - initial.timestamp();
    if time_period < Duration::zero() {
        return Err(EstimateError::FutureReadingViolation(billing_date));
    }

    Ok(time_period)
}

fn usage_units(readings: &[Reading]) -> Result<String, EstimateError> {
    let mut units: Vec<String> = readings
        .iter()
        .map(|reading| reading.units().to_string())
        .collect();
    units.sort();
    units.dedup();

    if units.len() > 1 {
        return Err(EstimateError::InconsistentUnits(units));
    }

    Ok(units.remove(0))
}
