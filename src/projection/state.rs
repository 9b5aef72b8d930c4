//! Running state carried from one contract year to the next

use super::config::ProjectionConfig;

/// Escalating quantities at a point in the projection
#[derive(Debug, Clone)]
pub struct YearState {
    /// Current contract year (1-indexed once advanced)
    pub year: u32,

    /// Unrounded generation (kWh); rows carry the rounded value
    pub generation: f64,

    pub tariff: f64,

    pub omr: f64,
}

impl YearState {
    /// State before year 1, holding the base values
    pub fn from_config(config: &ProjectionConfig) -> Self {
        Self {
            year: 0,
            generation: config.year1_generation(),
            tariff: config.ppa_tariff,
            omr: config.year1_omr(),
        }
    }

    /// Advance to the next year. Year 1 keeps the base values; escalation
    /// and degradation start compounding from year 2.
    pub fn advance_year(&mut self, config: &ProjectionConfig) {
        self.year += 1;

        if self.year >= 2 {
            self.generation *= 1.0 - config.degradation_pct / 100.0;
            self.tariff *= 1.0 + config.tariff_escalation_pct / 100.0;
            self.omr *= 1.0 + config.omr_escalation_pct / 100.0;
        }
    }

    /// Generation rounded to whole kWh
    pub fn generation_kwh(&self) -> i64 {
        self.generation.round() as i64
    }
}
