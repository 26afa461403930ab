use crate::data_structures::{Account, DataRoot, DualTariff, Member, Reading, Tariff};
use crate::validation::validate_account;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::warn;

pub struct DataLoader;

impl DataLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load_data_root<P: AsRef<Path>>(&self, path: P) -> Result<DataRoot> {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read readings file: {}", path.as_ref().display()))?;
        self.data_root_from_json(&text)
    }

    pub fn load_dual_tariff<P: AsRef<Path>>(&self, path: P) -> Result<DualTariff> {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read tariff file: {}", path.as_ref().display()))?;
        self.dual_tariff_from_json(&text)
    }

    pub fn data_root_from_json(&self, json_str: &str) -> Result<DataRoot> {
        let root: Value =
            serde_json::from_str(json_str).context("failed to parse readings document")?;
        let members = root
            .as_object()
            .context("readings document must be an object keyed by member name")?;

        let members = members
            .iter()
            .map(|(name, accounts)| self.parse_member(name, accounts))
            .collect::<Result<Vec<Member>>>()?;

        Ok(DataRoot::new(members))
    }

    pub fn dual_tariff_from_json(&self, json_str: &str) -> Result<DualTariff> {
        let root: Value =
            serde_json::from_str(json_str).context("failed to parse tariff document")?;

        let electricity = self
            .parse_tariff(root.get("electricity"))
            .context("invalid electricity tariff")?;
        let gas = self
            .parse_tariff(root.get("gas"))
            .context("invalid gas tariff")?;

        Ok(DualTariff::new(electricity, gas))
    }

    fn parse_member(&self, name: &str, value: &Value) -> Result<Member> {
        let accounts = value
            .as_object()
            .with_context(|| format!("member '{}' must be an object keyed by account name", name))?;

        let accounts = accounts
            .iter()
            .map(|(account_name, readings)| self.parse_account(account_name, readings))
            .collect::<Result<Vec<Account>>>()?;

        Ok(Member::new(name.to_string(), accounts))
    }

    fn parse_account(&self, name: &str, value: &Value) -> Result<Account> {
        let electricity = self
            .parse_readings(value.get("electricity"))
            .with_context(|| format!("invalid electricity readings for account '{}'", name))?;
        let gas = self
            .parse_readings(value.get("gas"))
            .with_context(|| format!("invalid gas readings for account '{}'", name))?;

        let account = Account::new(name.to_string(), electricity, gas);
        if let Err(violations) = validate_account(&account) {
            for violation in &violations {
                warn!(account = name, "{}", violation);
            }
            let summary = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            anyhow::bail!("account '{}' failed validation: {}", name, summary);
        }

        Ok(account)
    }

    fn parse_readings(&self, value: Option<&Value>) -> Result<Vec<Reading>> {
        // A missing kind key means the account has no service of that kind.
        let Some(value) = value else {
            return Ok(Vec::new());
        };

        value
            .as_array()
            .context("readings must be an array")?
            .iter()
            .map(|entry| self.parse_reading(entry))
            .collect()
    }

    fn parse_reading(&self, value: &Value) -> Result<Reading> {
        let cumulative = value
            .get("cumulative")
            .and_then(Value::as_u64)
            .context("missing or invalid 'cumulative' field")?;
        let timestamp = value
            .get("timestamp")
            .and_then(Value::as_str)
            .context("missing or invalid 'timestamp' field")?;
        let timestamp = self.parse_timestamp(timestamp)?;
        let units = value
            .get("units")
            .and_then(Value::as_str)
            .context("missing or invalid 'units' field")?
            .to_string();

        Ok(Reading::new(cumulative, timestamp, units))
    }

    fn parse_timestamp(&self, raw: &str) -> Result<DateTime<Utc>> {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(timestamp.with_timezone(&Utc));
        }

        // Zone-less timestamps and bare dates are treated as UTC.
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Ok(timestamp.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
        }

        anyhow::bail!("failed to parse timestamp '{}'", raw)
    }

    fn parse_tariff(&self, value: Option<&Value>) -> Result<Tariff> {
        let value = value.context("missing tariff entry")?;
        let standing_charge = self.parse_charge(value, "standing_charge")?;
        let unit_charge = self.parse_charge(value, "unit_charge")?;

        Ok(Tariff::new(standing_charge, unit_charge))
    }

    fn parse_charge(&self, value: &Value, key: &str) -> Result<Decimal> {
        // Parsed from the textual form in both cases; charges never pass
        // through binary floating point.
        match value.get(key) {
            Some(Value::String(raw)) => raw
                .parse::<Decimal>()
                .with_context(|| format!("invalid decimal in '{}': {}", key, raw)),
            Some(Value::Number(raw)) => raw
                .to_string()
                .parse::<Decimal>()
                .with_context(|| format!("invalid decimal in '{}': {}", key, raw)),
            _ => anyhow::bail!("missing or invalid '{}' field", key),
        }
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_READINGS: &str = r#"{
        "member-1": {
            "account-1": {
                "electricity": [
                    {"cumulative": 12000, "timestamp": "2019-01-01T00:00:00Z", "units": "kWh"},
                    {"cumulative": 13500, "timestamp": "2019-02-01T00:00:00Z", "units": "kWh"}
                ]
            }
        }
    }"#;

    #[test]
    fn test_parse_readings_document() {
        let loader = DataLoader::new();

        let data_root = loader.data_root_from_json(SAMPLE_READINGS).unwrap();

        let account = data_root
            .member("member-1")
            .unwrap()
            .account("account-1")
            .unwrap();
        assert_eq!(
            account.electricity_readings(),
            &[
                Reading::new(
                    12000,
                    Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap(),
                    "kWh".to_string(),
                ),
                Reading::new(
                    13500,
                    Utc.with_ymd_and_hms(2019, 2, 1, 0, 0, 0).unwrap(),
                    "kWh".to_string(),
                ),
            ]
        );
        assert!(account.gas_readings().is_empty());
    }

    #[test]
    fn test_parse_zone_less_timestamps() {
        let loader = DataLoader::new();
        let json = r#"{
            "member-1": {
                "account-1": {
                    "gas": [
                        {"cumulative": 100, "timestamp": "2019-01-01T12:30:00", "units": "m3"},
                        {"cumulative": 200, "timestamp": "2019-02-01", "units": "m3"}
                    ]
                }
            }
        }"#;

        let data_root = loader.data_root_from_json(json).unwrap();

        let account = data_root
            .member("member-1")
            .unwrap()
            .account("account-1")
            .unwrap();
        assert_eq!(
            account.gas_readings()[0].timestamp(),
            Utc.with_ymd_and_hms(2019, 1, 1, 12, 30, 0).unwrap()
        );
        assert_eq!(
            account.gas_readings()[1].timestamp(),
            Utc.with_ymd_and_hms(2019, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_invalid_account_is_rejected() {
        let loader = DataLoader::new();
        let json = r#"{
            "member-1": {
                "account-1": {
                    "electricity": [
                        {"cumulative": 100, "timestamp": "2019-01-01T00:00:00Z", "units": "kWh"},
                        {"cumulative": 200, "timestamp": "2019-01-01T00:00:00Z", "units": "kWh"}
                    ]
                }
            }
        }"#;

        let error = loader.data_root_from_json(json).unwrap_err();

        assert!(error.to_string().contains("failed validation"));
    }

    #[test]
    fn test_missing_reading_field() {
        let loader = DataLoader::new();
        let json = r#"{
            "member-1": {
                "account-1": {
                    "electricity": [
                        {"timestamp": "2019-01-01T00:00:00Z", "units": "kWh"}
                    ]
                }
            }
        }"#;

        assert!(loader.data_root_from_json(json).is_err());
    }

    #[test]
    fn test_parse_tariff_document() {
        let loader = DataLoader::new();
        let json = r#"{
            "electricity": {"standing_charge": "0.24", "unit_charge": "0.13"},
            "gas": {"standing_charge": 0.26, "unit_charge": 0.04}
        }"#;

        let tariffs = loader.dual_tariff_from_json(json).unwrap();

        assert_eq!(tariffs.electricity().standing_charge(), dec!(0.24));
        assert_eq!(tariffs.electricity().unit_charge(), dec!(0.13));
        assert_eq!(tariffs.gas().standing_charge(), dec!(0.26));
        assert_eq!(tariffs.gas().unit_charge(), dec!(0.04));
    }

    #[test]
    fn test_tariff_with_missing_kind() {
        let loader = DataLoader::new();
        let json = r#"{"electricity": {"standing_charge": "1", "unit_charge": "2"}}"#;

        assert!(loader.dual_tariff_from_json(json).is_err());
    }

    #[test]
    fn test_load_data_root_from_file() {
        let loader = DataLoader::new();
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE_READINGS.as_bytes()).unwrap();

        let data_root = loader.load_data_root(temp_file.path()).unwrap();

        assert_eq!(data_root.members().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let loader = DataLoader::new();

        assert!(loader.load_data_root("does-not-exist.json").is_err());
    }
}
