use crate::data_structures::{Account, Reading, UtilityKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A reading-series invariant broken by the input data. Callers decide
/// whether a violation rejects the data or is merely reported.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum Violation {
    DuplicateTimestamp {
        kind: UtilityKind,
        timestamp: DateTime<Utc>,
    },
    MixedUnits {
        kind: UtilityKind,
        units: Vec<String>,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateTimestamp { kind, timestamp } => {
                write!(f, "{} readings share the timestamp {}", kind.name(), timestamp)
            }
            Violation::MixedUnits { kind, units } => {
                write!(f, "{} readings mix unit labels: {}", kind.name(), units.join(", "))
            }
        }
    }
}

pub fn validate_account(account: &Account) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    for kind in UtilityKind::ALL {
        violations.extend(validate_readings(kind, account.readings(kind)));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

pub fn validate_readings(kind: UtilityKind, readings: &[Reading]) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for reading in readings {
        let timestamp = reading.timestamp();
        if !seen.insert(timestamp) && reported.insert(timestamp) {
            violations.push(Violation::DuplicateTimestamp { kind, timestamp });
        }
    }

    let mut units: Vec<String> = readings
        .iter()
        .map(|reading| reading.units().to_string())
        .collect();
    units.sort();
    units.dedup();
    if units.len() > 1 {
        violations.push(Violation::MixedUnits { kind, units });
    }

    violations
}
