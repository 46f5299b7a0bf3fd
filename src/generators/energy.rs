//! Energy generator
//!
//! Produces a single aggregate [`EnergySnapshot`] per refresh: regional
//! demand from a time-bucket multiplier table with a temperature adjustment,
//! a generation mix drawn per source, grid frequency jitter, and an outage
//! count independent of demand.

use rand::Rng;

use crate::config::{CityConfig, EnergyParams};
use crate::generators::round_to;
use crate::models::EnergySnapshot;
use crate::temporal::TemporalContext;

/// Extra demand multiplier on hot days (cooling load)
const COOLING_LOAD: f64 = 0.2;

/// Extra demand multiplier on cold days (heating load)
const HEATING_LOAD: f64 = 0.15;

/// Generate the grid snapshot for this refresh.
pub fn generate<R>(config: &CityConfig, ctx: &TemporalContext, rng: &mut R) -> EnergySnapshot
where
    R: Rng + ?Sized,
{
    let params = &config.energy;
    let (temp_lo, temp_hi) = params.temperature_range_c;
    let temperature_c = rng.random_range(temp_lo..=temp_hi);

    let multiplier = demand_multiplier(ctx) + weather_adjustment(temperature_c, params);
    let total_demand_mw = params.base_load_mw * multiplier + rng.random_range(-100.0..=100.0);

    // Shares are drawn independently; if the three sum above 1 they are
    // renormalized and the remainder clamps to zero, so the four shares
    // always sum to 1.
    let mut renewable_pct = rng.random_range(params.renewable_range.0..=params.renewable_range.1);
    let mut nuclear_pct = rng.random_range(params.nuclear_range.0..=params.nuclear_range.1);
    let mut natural_gas_pct = rng.random_range(params.gas_range.0..=params.gas_range.1);
    let drawn = renewable_pct + nuclear_pct + natural_gas_pct;
    let other_pct = if drawn > 1.0 {
        let scale = 1.0 / drawn;
        renewable_pct *= scale;
        nuclear_pct *= scale;
        natural_gas_pct *= scale;
        0.0
    } else {
        1.0 - drawn
    };

    EnergySnapshot {
        total_demand_mw: round_to(total_demand_mw, 1),
        renewable_pct,
        nuclear_pct,
        natural_gas_pct,
        other_pct,
        grid_frequency_hz: round_to(60.0 + rng.random_range(-0.05..=0.05), 3),
        peak_load_ratio: round_to(total_demand_mw / (params.base_load_mw * 1.5), 3),
        outage_count: rng.random_range(0..=5),
        temperature_f: round_to(temperature_c * 9.0 / 5.0 + 32.0, 1),
    }
}

/// Demand multiplier keyed by `(is_weekday, hour bucket)`.
pub(crate) fn demand_multiplier(ctx: &TemporalContext) -> f64 {
    if ctx.is_weekday {
        match ctx.hour {
            8..=18 => 1.3,         // business hours
            6..=7 | 19..=22 => 1.4, // peak residential
            _ => 0.8,              // off-peak
        }
    } else {
        match ctx.hour {
            10..=16 => 1.1, // weekend day
            18..=23 => 1.2, // weekend evening
            _ => 0.9,
        }
    }
}

/// Cooling or heating adjustment to the demand multiplier.
pub(crate) fn weather_adjustment(temperature_c: f64, params: &EnergyParams) -> f64 {
    if temperature_c > params.cooling_threshold_c {
        COOLING_LOAD
    } else if temperature_c < params.heating_threshold_c {
        HEATING_LOAD
    } else {
        0.0
    }
}
