use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use super::engine::project;
use super::reconcile::reconcile;
use super::types::{
    AlignedRow, ParameterError, Projection, ScenarioId, ScenarioParameters, ScenarioResult,
};

pub const MAX_SCENARIOS: usize = 3;

/// A single field edit coming from a scenario form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterChange {
    Principal(f64),
    AnnualRatePercent(f64),
    HorizonYears(u32),
    CompoundingFrequency(u32),
    RecurringContribution(f64),
}

impl ParameterChange {
    fn apply_to(self, params: &mut ScenarioParameters) {
        match self {
            ParameterChange::Principal(v) => params.principal = v,
            ParameterChange::AnnualRatePercent(v) => params.annual_rate_percent = v,
            ParameterChange::HorizonYears(v) => params.horizon_years = v,
            ParameterChange::CompoundingFrequency(v) => params.compounding_frequency = v.max(1),
            ParameterChange::RecurringContribution(v) => params.recurring_contribution = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkbenchError {
    #[error("unknown scenario {0}")]
    UnknownScenario(ScenarioId),
    #[error("at most {max} scenarios can be compared", max = MAX_SCENARIOS)]
    TooManyScenarios,
    #[error("scenario {id}: {source}")]
    InvalidParameter {
        id: ScenarioId,
        #[source]
        source: ParameterError,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub results: BTreeMap<ScenarioId, ScenarioResult>,
    pub rows: Vec<AlignedRow>,
}

#[derive(Debug, Clone)]
struct Entry {
    params: ScenarioParameters,
    projection: Projection,
}

/// Scenario parameters keyed by id, with each scenario's projection
/// recomputed whenever its parameters change.
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    entries: BTreeMap<ScenarioId, Entry>,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut workbench = Self::new();
        for (id, params) in default_scenarios() {
            workbench.entries.insert(
                id,
                Entry {
                    projection: project(&params),
                    params,
                },
            );
        }
        workbench
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ScenarioId> + '_ {
        self.entries.keys().copied()
    }

    pub fn set_scenario(
        &mut self,
        id: ScenarioId,
        params: ScenarioParameters,
    ) -> Result<(), WorkbenchError> {
        if !self.entries.contains_key(&id) && self.entries.len() >= MAX_SCENARIOS {
            return Err(WorkbenchError::TooManyScenarios);
        }
        params
            .validate()
            .map_err(|source| WorkbenchError::InvalidParameter { id, source })?;

        let projection = recompute(id, &params);
        self.entries.insert(id, Entry { params, projection });
        Ok(())
    }

    pub fn apply(&mut self, id: ScenarioId, change: ParameterChange) -> Result<(), WorkbenchError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(WorkbenchError::UnknownScenario(id))?;

        let mut params = entry.params;
        change.apply_to(&mut params);
        params
            .validate()
            .map_err(|source| WorkbenchError::InvalidParameter { id, source })?;

        entry.projection = recompute(id, &params);
        entry.params = params;
        Ok(())
    }

    pub fn remove_scenario(&mut self, id: ScenarioId) -> Option<ScenarioParameters> {
        self.entries.remove(&id).map(|entry| entry.params)
    }

    pub fn parameters(&self, id: ScenarioId) -> Option<&ScenarioParameters> {
        self.entries.get(&id).map(|entry| &entry.params)
    }

    pub fn projection(&self, id: ScenarioId) -> Option<&Projection> {
        self.entries.get(&id).map(|entry| &entry.projection)
    }

    pub fn result(&self, id: ScenarioId) -> Option<ScenarioResult> {
        self.projection(id).map(|projection| projection.summary)
    }

    pub fn comparison(&self) -> Comparison {
        let keyed = self
            .entries
            .iter()
            .map(|(id, entry)| (*id, &entry.projection))
            .collect::<Vec<_>>();
        Comparison {
            results: self
                .entries
                .iter()
                .map(|(id, entry)| (*id, entry.projection.summary))
                .collect(),
            rows: reconcile(&keyed),
        }
    }
}

fn recompute(id: ScenarioId, params: &ScenarioParameters) -> Projection {
    let projection = project(params);
    tracing::debug!(
        scenario = %id,
        horizon_years = params.horizon_years,
        final_balance = projection.summary.final_balance,
        "scenario recomputed"
    );
    projection
}

pub fn default_scenarios() -> [(ScenarioId, ScenarioParameters); 2] {
    [
        (
            ScenarioId(1),
            ScenarioParameters {
                principal: 10_000.0,
                annual_rate_percent: 5.0,
                horizon_years: 10,
                compounding_frequency: 12,
                recurring_contribution: 500.0,
            },
        ),
        (
            ScenarioId(2),
            ScenarioParameters {
                principal: 15_000.0,
                annual_rate_percent: 7.0,
                horizon_years: 10,
                compounding_frequency: 12,
                recurring_contribution: 300.0,
            },
        ),
    ]
}
