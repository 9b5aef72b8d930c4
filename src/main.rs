//! Solar PPA CLI
//!
//! Builds a projection from a JSON config and/or command-line overrides,
//! prints the key metrics and the yearly or monthly table, and optionally
//! exports the table as CSV or the whole projection as JSON. Passing
//! `--config` more than once compares the configurations side by side.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use solar_ppa::export::{export_csv, flatten_rows, write_json, TableRow};
use solar_ppa::{
    build_monthly_projection, build_yearly_projection, MonthRow, ProjectionConfig,
    ScenarioRunner, YearRow, YearlySummary,
};

#[derive(Debug, Parser)]
#[command(name = "solar_ppa", version, about = "Solar PPA cash-flow projection")]
struct Cli {
    /// JSON file with projection parameters; omitted fields use defaults.
    /// Repeat to compare several configurations.
    #[arg(long)]
    config: Vec<PathBuf>,

    #[arg(long)]
    capacity_kw: Option<f64>,
    #[arg(long)]
    units_per_kw_day: Option<f64>,
    #[arg(long)]
    degradation_pct: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    contract_years: Option<i32>,
    #[arg(long)]
    tariff: Option<f64>,
    #[arg(long)]
    tariff_escalation_pct: Option<f64>,
    #[arg(long)]
    capex_per_kw: Option<f64>,
    #[arg(long)]
    upfront_percent: Option<f64>,
    #[arg(long)]
    loan_interest_pct: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    loan_tenure_years: Option<i32>,
    #[arg(long)]
    omr_per_kw_year: Option<f64>,
    #[arg(long)]
    omr_escalation_pct: Option<f64>,
    #[arg(long)]
    discount_rate_pct: Option<f64>,

    /// Show the monthly table instead of the yearly one
    #[arg(long)]
    monthly: bool,

    /// Columns to show and export, comma separated
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Write the active table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full projection as JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// One config per `--config` file, or the defaults, with overrides applied
    fn projection_configs(&self) -> Result<Vec<ProjectionConfig>> {
        let mut configs = if self.config.is_empty() {
            vec![ProjectionConfig::default()]
        } else {
            self.config
                .iter()
                .map(|path| {
                    ProjectionConfig::from_json_path(path)
                        .with_context(|| format!("loading config {}", path.display()))
                })
                .collect::<Result<Vec<_>>>()?
        };

        for config in &mut configs {
            self.apply_overrides(config);
        }
        Ok(configs)
    }

    fn apply_overrides(&self, config: &mut ProjectionConfig) {
        let overrides = [
            (self.capacity_kw, &mut config.capacity_kw),
            (self.units_per_kw_day, &mut config.units_per_kw_day),
            (self.degradation_pct, &mut config.degradation_pct),
            (self.tariff, &mut config.ppa_tariff),
            (self.tariff_escalation_pct, &mut config.tariff_escalation_pct),
            (self.capex_per_kw, &mut config.capex_per_kw),
            (self.upfront_percent, &mut config.upfront_percent),
            (self.loan_interest_pct, &mut config.loan_interest_pct),
            (self.omr_per_kw_year, &mut config.omr_per_kw_year),
            (self.omr_escalation_pct, &mut config.omr_escalation_pct),
            (self.discount_rate_pct, &mut config.discount_rate_pct),
        ];
        for (value, field) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        if let Some(years) = self.contract_years {
            config.contract_years = years;
        }
        if let Some(years) = self.loan_tenure_years {
            config.loan_tenure_years = years;
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut configs = cli.projection_configs()?;
    if configs.len() > 1 {
        return compare(&cli, &configs);
    }
    let config = configs.remove(0);
    log::info!("projecting {:.1} kW over {} years", config.capacity_kw, config.contract_years);

    let yearly = build_yearly_projection(&config);
    let monthly = build_monthly_projection(&yearly);

    if cli.json {
        #[derive(serde::Serialize)]
        struct Output<'a> {
            config: &'a ProjectionConfig,
            metrics: solar_ppa::projection::KeyMetrics,
            yearly: &'a YearlySummary,
            monthly: &'a solar_ppa::MonthlySummary,
        }

        let output = Output {
            config: &config,
            metrics: yearly.metrics(),
            yearly: &yearly,
            monthly: &monthly,
        };
        write_json(&output, io::stdout().lock()).context("writing JSON")?;
        println!();
        return Ok(());
    }

    print_summary(&yearly);

    let columns: Option<Vec<&str>> = cli
        .columns
        .as_ref()
        .map(|cols| cols.iter().map(|c| c.trim()).collect());

    if cli.monthly {
        let headers = columns.unwrap_or_else(|| MonthRow::COLUMNS[1..].to_vec());
        print_table(&monthly.rows, &headers)?;
        if let Some(path) = &cli.csv {
            export_csv(&monthly.rows, &headers, path)
                .with_context(|| format!("exporting {}", path.display()))?;
            println!("\nMonthly table written to: {}", path.display());
        }
    } else {
        let headers = columns.unwrap_or_else(|| YearRow::COLUMNS.to_vec());
        print_table(&yearly.rows, &headers)?;
        if let Some(path) = &cli.csv {
            export_csv(&yearly.rows, &headers, path)
                .with_context(|| format!("exporting {}", path.display()))?;
            println!("\nYearly table written to: {}", path.display());
        }
    }

    Ok(())
}

/// Run every configuration in parallel and print one line of metrics each
fn compare(cli: &Cli, configs: &[ProjectionConfig]) -> Result<()> {
    let results = ScenarioRunner::default().run_configs(configs);

    if cli.json {
        write_json(&results, io::stdout().lock()).context("writing JSON")?;
        println!();
        return Ok(());
    }

    println!("{:<32} {:>16} {:>9} {:>12} {:>16}", "Config", "NPV", "IRR", "Payback", "End cumulative");
    println!("{}", "-".repeat(89));
    for (path, result) in cli.config.iter().zip(&results) {
        let metrics = result.yearly.metrics();
        println!(
            "{:<32} {:>16.2} {:>9} {:>12} {:>16.2}",
            path.display(),
            metrics.npv,
            format_irr(metrics.irr),
            format_payback(metrics.payback_year),
            metrics.final_cumulative,
        );
    }

    Ok(())
}

fn print_summary(yearly: &YearlySummary) {
    let metrics = yearly.metrics();

    println!("Solar PPA Projection");
    println!("====================\n");
    println!("  Capex:            {:>16.2}", yearly.capex_total);
    println!("  Upfront equity:   {:>16.2}", yearly.upfront);
    println!("  Loan amount:      {:>16.2}", yearly.loan_amount);
    println!("  Annual EMI:       {:>16.2}", yearly.emi_annual);
    println!("  Year-1 gen (kWh): {:>16}", yearly.year1_gen);
    println!("  Year-1 revenue:   {:>16.2}", yearly.year1_revenue);
    println!("  NPV:              {:>16.2}", metrics.npv);
    println!("  IRR:              {:>16}", format_irr(metrics.irr));
    println!("  Payback:          {:>16}", format_payback(metrics.payback_year));
    println!("  End cumulative:   {:>16.2}", metrics.final_cumulative);
    println!();
}

fn print_table<R: TableRow>(rows: &[R], headers: &[&str]) -> Result<()> {
    let table = flatten_rows(rows, headers)?;

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            table
                .iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    println!("{}", format_line(headers.iter().copied(), &widths));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in &table {
        println!("{}", format_line(row.iter().map(String::as_str), &widths));
    }

    Ok(())
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(c, w)| format!("{:>w$}", c, w = *w))
        .collect::<Vec<_>>()
        .join("  ")
}

fn format_irr(irr: Option<f64>) -> String {
    match irr {
        Some(rate) => format!("{:.2}%", rate * 100.0),
        None => "n/a".to_string(),
    }
}

fn format_payback(year: Option<u32>) -> String {
    match year {
        Some(y) => format!("year {}", y),
        None => "beyond term".to_string(),
    }
}
