use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityKind {
    Electricity,
    Gas,
}

impl UtilityKind {
    pub const ALL: [UtilityKind; 2] = [UtilityKind::Electricity, UtilityKind::Gas];

    pub fn name(&self) -> &'static str {
        match self {
            UtilityKind::Electricity => "Electricity",
            UtilityKind::Gas => "Gas",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    cumulative: u64,
    timestamp: DateTime<Utc>,
    units: String,
}

impl Reading {
    pub fn new(cumulative: u64, timestamp: DateTime<Utc>, units: String) -> Self {
        Self {
            cumulative,
            timestamp,
            units,
        }
    }

    pub fn cumulative(&self) -> u64 {
        self.cumulative
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn units(&self) -> &str {
        &self.units
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    name: String,
    electricity_readings: Vec<Reading>,
    gas_readings: Vec<Reading>,
}

impl Account {
    pub fn new(
        name: String,
        electricity_readings: Vec<Reading>,
        gas_readings: Vec<Reading>,
    ) -> Self {
        Self {
            name,
            electricity_readings,
            gas_readings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn electricity_readings(&self) -> &[Reading] {
        &self.electricity_readings
    }

    pub fn gas_readings(&self) -> &[Reading] {
        &self.gas_readings
    }

    pub fn readings(&self, kind: UtilityKind) -> &[Reading] {
        match kind {
            UtilityKind::Electricity => &self.electricity_readings,
            UtilityKind::Gas => &self.gas_readings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    name: String,
    accounts: Vec<Account>,
}

impl Member {
    pub fn new(name: String, accounts: Vec<Account>) -> Self {
        Self { name, accounts }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRoot {
    members: Vec<Member>,
}

impl DataRoot {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tariff {
    standing_charge: Decimal,
    unit_charge: Decimal,
}

impl Tariff {
    pub fn new(standing_charge: Decimal, unit_charge: Decimal) -> Self {
        Self {
            standing_charge,
            unit_charge,
        }
    }

    pub fn standing_charge(&self) -> Decimal {
        self.standing_charge
    }

    pub fn unit_charge(&self) -> Decimal {
        self.unit_charge
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualTariff {
    electricity: Tariff,
    gas: Tariff,
}

impl DualTariff {
    pub fn new(electricity: Tariff, gas: Tariff) -> Self {
        Self { electricity, gas }
    }

    pub fn electricity(&self) -> &Tariff {
        &self.electricity
    }

    pub fn gas(&self) -> &Tariff {
        &self.gas
    }

    pub fn tariff(&self, kind: UtilityKind) -> &Tariff {
        match kind {
            UtilityKind::Electricity => &self.electricity,
            UtilityKind::Gas => &self.gas,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEstimate {
    billing_date: DateTime<Utc>,
    time_period: Duration,
    usage_estimate: Decimal,
    usage_units: String,
}

impl UsageEstimate {
    pub fn new(
        billing_date: DateTime<Utc>,
        time_period: Duration,
        usage_estimate: Decimal,
        usage_units: String,
    ) -> Self {
        Self {
            billing_date,
            time_period,
            usage_estimate,
            usage_units,
        }
    }

    pub fn billing_date(&self) -> DateTime<Utc> {
        self.billing_date
    }

    pub fn time_period(&self) -> Duration {
        self.time_period
    }

    pub fn usage_estimate(&self) -> Decimal {
        self.usage_estimate
    }

    pub fn usage_units(&self) -> &str {
        &self.usage_units
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillEstimate {
    billing_date: DateTime<Utc>,
    billing_period: Duration,
    usage_estimate: Decimal,
    usage_units: String,
    price_estimate: Decimal,
}

impl BillEstimate {
    pub fn new(
        billing_date: DateTime<Utc>,
        billing_period: Duration,
        usage_estimate: Decimal,
        usage_units: String,
        price_estimate: Decimal,
    ) -> Self {
        Self {
            billing_date,
            billing_period,
            usage_estimate,
            usage_units,
            price_estimate,
        }
    }

    pub fn billing_date(&self) -> DateTime<Utc> {
        self.billing_date
    }

    pub fn billing_period(&self) -> Duration {
        self.billing_period
    }

    pub fn period_start(&self) -> DateTime<Utc> {
        self.billing_date - self.billing_period
    }

    pub fn usage_estimate(&self) -> Decimal {
        self.usage_estimate
    }

    pub fn usage_units(&self) -> &str {
        &self.usage_units
    }

    pub fn price_estimate(&self) -> Decimal {
        self.price_estimate
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualBillEstimate {
    billing_date: DateTime<Utc>,
    electricity: Option<BillEstimate>,
    gas: Option<BillEstimate>,
}

impl DualBillEstimate {
    pub fn new(
        billing_date: DateTime<Utc>,
        electricity: Option<BillEstimate>,
        gas: Option<BillEstimate>,
    ) -> Self {
        Self {
            billing_date,
            electricity,
            gas,
        }
    }

    pub fn billing_date(&self) -> DateTime<Utc> {
        self.billing_date
    }

    pub fn electricity(&self) -> Option<&BillEstimate> {
        self.electricity.as_ref()
    }

    pub fn gas(&self) -> Option<&BillEstimate> {
        self.gas.as_ref()
    }

    pub fn estimate(&self, kind: UtilityKind) -> Option<&BillEstimate> {
        match kind {
            UtilityKind::Electricity => self.electricity.as_ref(),
            UtilityKind::Gas => self.gas.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.electricity.is_none() && self.gas.is_none()
    }
}
