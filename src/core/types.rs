use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(pub u32);

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Common compounding cadences. The engine itself accepts any positive
/// number of periods per year.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Frequency {
    Annually,
    Quarterly,
    Monthly,
    Daily,
}

impl Frequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Annually => 1,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Daily => 365,
        }
    }
}

/// Longest horizon accepted by [`ScenarioParameters::validate`].
pub const MAX_HORIZON_YEARS: u32 = 200;
/// Most periods per year accepted by [`ScenarioParameters::validate`] (daily).
pub const MAX_COMPOUNDING_FREQUENCY: u32 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParameters {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub horizon_years: u32,
    pub compounding_frequency: u32,
    /// Monthly-equivalent amount; scaled to the compounding period.
    pub recurring_contribution: f64,
}

impl ScenarioParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !self.principal.is_finite() {
            return Err(ParameterError::invalid("principal", "must be a finite number"));
        }
        if self.principal < 0.0 {
            return Err(ParameterError::invalid("principal", "must be >= 0"));
        }
        if !self.annual_rate_percent.is_finite() {
            return Err(ParameterError::invalid(
                "annualRatePercent",
                "must be a finite number",
            ));
        }
        if self.compounding_frequency == 0 {
            return Err(ParameterError::invalid(
                "compoundingFrequency",
                "must be >= 1",
            ));
        }
        if self.compounding_frequency > MAX_COMPOUNDING_FREQUENCY {
            return Err(ParameterError::invalid(
                "compoundingFrequency",
                "must be <= 365",
            ));
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ParameterError::invalid("horizonYears", "must be <= 200"));
        }
        if !self.recurring_contribution.is_finite() {
            return Err(ParameterError::invalid(
                "recurringContribution",
                "must be a finite number",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("invalid parameter {field}: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: &'static str,
    },
}

impl ParameterError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        ParameterError::InvalidParameter { field, reason }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPoint {
    pub year: u32,
    pub balance: i64,
    pub cumulative_contributions: i64,
    pub cumulative_interest: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub final_balance: i64,
    pub total_interest: i64,
    pub total_contributions: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub series: Vec<YearPoint>,
    pub summary: ScenarioResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesValues {
    pub balance: i64,
    pub contributions: i64,
    pub interest: i64,
}

impl From<&YearPoint> for SeriesValues {
    fn from(point: &YearPoint) -> Self {
        Self {
            balance: point.balance,
            contributions: point.cumulative_contributions,
            interest: point.cumulative_interest,
        }
    }
}

/// One chart row. Serializes flat as `year`, `balance{id}`,
/// `contributions{id}` and `interest{id}` for every scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRow {
    pub year: u32,
    pub values: Vec<(ScenarioId, SeriesValues)>,
}

impl AlignedRow {
    pub fn get(&self, id: ScenarioId) -> Option<&SeriesValues> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, values)| values)
    }
}

impl Serialize for AlignedRow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1 + self.values.len() * 3))?;
        map.serialize_entry("year", &self.year)?;
        for (id, values) in &self.values {
            map.serialize_entry(&format!("balance{id}"), &values.balance)?;
            map.serialize_entry(&format!("contributions{id}"), &values.contributions)?;
            map.serialize_entry(&format!("interest{id}"), &values.interest)?;
        }
        map.end()
    }
}
