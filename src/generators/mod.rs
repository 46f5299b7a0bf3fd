//! The four domain generators and the refresh cycle that runs them
//!
//! Each generator is a pure function of `(CityConfig, TemporalContext, Rng)`:
//! no generator reads ambient state, touches the wall clock, or depends on
//! another generator's output. They may run in any order; the only shared
//! resource is the injected random source, so callers that parallelize must
//! hand each generator its own `Rng` instance.

use rand::Rng;
use tracing::info;

use crate::config::CityConfig;
use crate::models::CitySnapshot;
use crate::temporal::TemporalContext;
use crate::Result;

pub mod air_quality;
pub mod energy;
pub mod traffic;
pub mod transit;

/// Run one full refresh cycle and collect the output of all four generators.
pub fn generate_snapshot<R>(
    config: &CityConfig,
    ctx: &TemporalContext,
    rng: &mut R,
) -> Result<CitySnapshot>
where
    R: Rng + ?Sized,
{
    let traffic = traffic::generate(config, ctx, rng);
    let transit = transit::generate(config, ctx, rng)?;
    let air_quality = air_quality::generate(config, ctx, rng);
    let energy = energy::generate(config, ctx, rng);

    info!(
        traffic_records = traffic.len(),
        transit_vehicles = transit.len(),
        aqi_stations = air_quality.len(),
        hour = ctx.hour,
        is_weekday = ctx.is_weekday,
        "generated city snapshot"
    );

    Ok(CitySnapshot {
        context: ctx.clone(),
        traffic,
        transit,
        air_quality,
        energy,
    })
}

/// Round to a fixed number of decimal places, matching the precision the
/// upstream feeds publish.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
