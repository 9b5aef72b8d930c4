//! Scenario runner for batch projections
//!
//! Holds a base configuration and evaluates variations of it. Every
//! projection is independent, so batches run in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::projection::{
    build_monthly_projection, build_yearly_projection, MonthlySummary, ProjectionConfig,
    YearlySummary,
};

/// Yearly and monthly output for one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub config: ProjectionConfig,
    pub yearly: YearlySummary,
    pub monthly: MonthlySummary,
}

impl ScenarioResult {
    fn evaluate(config: ProjectionConfig) -> Self {
        let yearly = build_yearly_projection(&config);
        let monthly = build_monthly_projection(&yearly);
        Self {
            config,
            yearly,
            monthly,
        }
    }
}

/// Headline metrics at one tariff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub ppa_tariff: f64,
    pub npv: f64,
    pub irr: Option<f64>,
    pub payback_year: Option<u32>,
}

/// Runs projections against a shared base configuration
///
/// # Example
/// ```
/// use solar_ppa::{ProjectionConfig, ScenarioRunner};
///
/// let runner = ScenarioRunner::new(ProjectionConfig::default());
/// let points = runner.tariff_sweep(&[4.0, 5.0, 6.0]);
/// assert!(points[2].npv > points[0].npv);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new(base: ProjectionConfig) -> Self {
        Self { base }
    }

    /// Run the base configuration
    pub fn run(&self) -> ScenarioResult {
        ScenarioResult::evaluate(self.base.clone())
    }

    /// Run each configuration; results keep the input order
    pub fn run_configs(&self, configs: &[ProjectionConfig]) -> Vec<ScenarioResult> {
        log::debug!("running {} scenarios", configs.len());
        configs
            .par_iter()
            .cloned()
            .map(ScenarioResult::evaluate)
            .collect()
    }

    /// Evaluate the base configuration at each tariff
    pub fn tariff_sweep(&self, tariffs: &[f64]) -> Vec<SweepPoint> {
        tariffs
            .par_iter()
            .map(|&ppa_tariff| {
                let config = ProjectionConfig {
                    ppa_tariff,
                    ..self.base.clone()
                };
                let yearly = build_yearly_projection(&config);
                SweepPoint {
                    ppa_tariff,
                    npv: yearly.npv,
                    irr: yearly.irr,
                    payback_year: yearly.payback_year,
                }
            })
            .collect()
    }

    pub fn base(&self) -> &ProjectionConfig {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ProjectionConfig {
        &mut self.base
    }
}
