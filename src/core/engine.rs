use super::types::{ParameterError, Projection, ScenarioParameters, ScenarioResult, YearPoint};

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy)]
struct RunningBalance {
    balance: f64,
    contributions: f64,
}

impl RunningBalance {
    fn snapshot(self, year: u32) -> YearPoint {
        let balance = round_half_up(self.balance);
        let contributions = round_half_up(self.contributions);
        YearPoint {
            year,
            balance,
            cumulative_contributions: contributions,
            cumulative_interest: balance - contributions,
        }
    }
}

pub fn project(params: &ScenarioParameters) -> Projection {
    let periods = params.compounding_frequency.max(1);
    let periods_f = periods as f64;
    let rate = params.annual_rate_percent / 100.0;
    let period_growth = 1.0 + rate / periods_f;
    let period_contribution = params.recurring_contribution * (MONTHS_PER_YEAR / periods_f);

    let mut running = RunningBalance {
        balance: params.principal,
        contributions: params.principal,
    };

    let mut series = Vec::with_capacity(params.horizon_years as usize + 1);
    series.push(YearPoint {
        year: 0,
        balance: round_half_up(params.principal),
        cumulative_contributions: round_half_up(params.principal),
        cumulative_interest: 0,
    });

    for year in 1..=params.horizon_years {
        for _ in 0..periods {
            running.balance = running.balance * period_growth + period_contribution;
            running.contributions += period_contribution;
        }
        series.push(running.snapshot(year));
    }

    let last = running.snapshot(params.horizon_years);
    Projection {
        series,
        summary: ScenarioResult {
            final_balance: last.balance,
            total_interest: last.cumulative_interest,
            total_contributions: last.cumulative_contributions,
        },
    }
}

pub fn try_project(params: &ScenarioParameters) -> Result<Projection, ParameterError> {
    params.validate()?;
    Ok(project(params))
}

/// Whole currency units, ties towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
