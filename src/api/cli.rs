use std::fmt::Write as _;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::{Frequency, Projection, ScenarioParameters, format_currency, try_project};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliFrequency {
    Annually,
    Quarterly,
    Monthly,
    Daily,
}

impl From<CliFrequency> for Frequency {
    fn from(value: CliFrequency) -> Self {
        match value {
            CliFrequency::Annually => Frequency::Annually,
            CliFrequency::Quarterly => Frequency::Quarterly,
            CliFrequency::Monthly => Frequency::Monthly,
            CliFrequency::Daily => Frequency::Daily,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "compound",
    about = "Compound growth projections with recurring contributions"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level for this crate; RUST_LOG takes precedence"
    )]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one scenario's year-by-year trajectory and totals
    Project(ProjectArgs),
    /// Serve the JSON projection API
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long, default_value_t = 10_000.0, help = "Initial capital")]
    pub principal: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        allow_hyphen_values = true,
        help = "Nominal annual interest rate in percent, e.g. 7; may be negative"
    )]
    pub rate: f64,
    #[arg(long, default_value_t = 10, help = "Number of years to project")]
    pub years: u32,
    #[arg(
        long,
        value_enum,
        conflicts_with = "periods",
        help = "Compounding and contribution cadence [default: monthly]"
    )]
    pub frequency: Option<CliFrequency>,
    #[arg(long, help = "Custom number of compounding periods per year")]
    pub periods: Option<u32>,
    #[arg(
        long,
        default_value_t = 500.0,
        help = "Monthly-equivalent recurring contribution, scaled to the period"
    )]
    pub contribution: f64,
    #[arg(long, help = "Emit JSON instead of a text table")]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub fn build_parameters(args: &ProjectArgs) -> ScenarioParameters {
    let compounding_frequency = args.periods.unwrap_or_else(|| {
        Frequency::from(args.frequency.unwrap_or(CliFrequency::Monthly)).periods_per_year()
    });
    ScenarioParameters {
        principal: args.principal,
        annual_rate_percent: args.rate,
        horizon_years: args.years,
        compounding_frequency,
        recurring_contribution: args.contribution,
    }
}

pub fn run_project(args: &ProjectArgs) -> Result<String, String> {
    let params = build_parameters(args);
    let projection = try_project(&params).map_err(|e| e.to_string())?;

    if args.json {
        let mut out = serde_json::to_string_pretty(&projection)
            .map_err(|e| format!("failed to serialize projection: {e}"))?;
        out.push('\n');
        return Ok(out);
    }
    Ok(render_table(&projection))
}

fn render_table(projection: &Projection) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>16}  {:>16}  {:>16}",
        "Year", "Balance", "Contributions", "Interest"
    );
    for point in &projection.series {
        let _ = writeln!(
            out,
            "{:>4}  {:>16}  {:>16}  {:>16}",
            point.year,
            format_currency(point.balance),
            format_currency(point.cumulative_contributions),
            format_currency(point.cumulative_interest),
        );
    }
    let summary = &projection.summary;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Final balance:       {}",
        format_currency(summary.final_balance)
    );
    let _ = writeln!(
        out,
        "Total contributions: {}",
        format_currency(summary.total_contributions)
    );
    let _ = writeln!(
        out,
        "Total interest:      {}",
        format_currency(summary.total_interest)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    fn project_args(cli: Cli) -> ProjectArgs {
        match cli.command {
            Command::Project(args) => args,
            other => panic!("expected project command, got {other:?}"),
        }
    }

    #[test]
    fn project_defaults_match_first_default_scenario() {
        let args = project_args(parse(&["compound", "project"]));
        let params = build_parameters(&args);
        assert_eq!(params.principal, 10_000.0);
        assert_eq!(params.annual_rate_percent, 5.0);
        assert_eq!(params.horizon_years, 10);
        assert_eq!(params.compounding_frequency, 12);
        assert_eq!(params.recurring_contribution, 500.0);
    }

    #[test]
    fn frequency_presets_and_custom_periods_resolve() {
        let args = project_args(parse(&["compound", "project", "--frequency", "daily"]));
        assert_eq!(build_parameters(&args).compounding_frequency, 365);

        let args = project_args(parse(&["compound", "project", "--periods", "26"]));
        assert_eq!(build_parameters(&args).compounding_frequency, 26);

        let err = Cli::try_parse_from([
            "compound",
            "project",
            "--frequency",
            "daily",
            "--periods",
            "26",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn negative_rate_is_accepted() {
        let args = project_args(parse(&["compound", "project", "--rate", "-3"]));
        assert_eq!(build_parameters(&args).annual_rate_percent, -3.0);
    }

    #[test]
    fn text_output_lists_every_year_and_totals() {
        let args = project_args(parse(&["compound", "project"]));
        let out = run_project(&args).expect("valid projection");
        assert_eq!(out.lines().filter(|l| l.contains('€')).count(), 11 + 3);
        assert!(out.contains("Final balance:       94 111 €"));
        assert!(out.contains("Total contributions: 70 000 €"));
        assert!(out.contains("Total interest:      24 111 €"));
    }

    #[test]
    fn json_output_uses_camel_case_fields() {
        let args = project_args(parse(&["compound", "project", "--json", "--years", "1"]));
        let out = run_project(&args).expect("valid projection");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["summary"]["finalBalance"], 16_651);
        assert_eq!(value["series"][1]["cumulativeContributions"], 16_000);
    }

    #[test]
    fn invalid_periods_are_reported() {
        let args = project_args(parse(&["compound", "project", "--periods", "0"]));
        let err = run_project(&args).expect_err("zero periods must be rejected");
        assert!(err.contains("compoundingFrequency"));
    }

    #[test]
    fn serve_defaults_to_all_interfaces_on_8080() {
        let cli = parse(&["compound", "serve", "--port", "9000"]);
        match cli.command {
            Command::Serve(args) => assert_eq!(args.addr().to_string(), "0.0.0.0:9000"),
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
