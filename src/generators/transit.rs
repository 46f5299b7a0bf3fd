//! Transit generator
//!
//! Produces a variable-size fleet of vehicle records per configured line.
//! Fleet size follows the line's service class; per-vehicle delay follows a
//! time-bucket Gaussian floored at zero; crowding and status are weighted
//! categorical draws. Vehicle speed is an independent uniform draw, not
//! derived from delay (a documented simplification).

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::config::CityConfig;
use crate::generators::round_to;
use crate::models::{CrowdingLevel, Direction, TransitVehicleRecord, VehicleStatus};
use crate::sampling;
use crate::temporal::TemporalContext;
use crate::{CityPulseError, Result};

/// Crowding distribution during rush hours; all four levels are reachable.
const RUSH_CROWDING: [(CrowdingLevel, f64); 4] = [
    (CrowdingLevel::ManySeatsAvailable, 0.1),
    (CrowdingLevel::FewSeatsAvailable, 0.3),
    (CrowdingLevel::StandingRoomOnly, 0.4),
    (CrowdingLevel::CrushedStandingRoomOnly, 0.2),
];

/// Crowding distribution outside rush hours; crush load does not occur.
const OFF_PEAK_CROWDING: [(CrowdingLevel, f64); 3] = [
    (CrowdingLevel::ManySeatsAvailable, 0.5),
    (CrowdingLevel::FewSeatsAvailable, 0.4),
    (CrowdingLevel::StandingRoomOnly, 0.1),
];

const STATUS_WEIGHTS: [(VehicleStatus, f64); 3] = [
    (VehicleStatus::OnTime, 0.6),
    (VehicleStatus::Delayed, 0.3),
    (VehicleStatus::Approaching, 0.1),
];

/// Generate the active fleet across all configured lines.
pub fn generate<R>(
    config: &CityConfig,
    ctx: &TemporalContext,
    rng: &mut R,
) -> Result<Vec<TransitVehicleRecord>>
where
    R: Rng + ?Sized,
{
    let (delay_mean, delay_std) = delay_params(ctx);
    let crowding: &[(CrowdingLevel, f64)] = if ctx.is_rush_hour() {
        &RUSH_CROWDING
    } else {
        &OFF_PEAK_CROWDING
    };

    let mut vehicles = Vec::new();
    for line in &config.transit_lines {
        let (min_fleet, max_fleet) = line.service_class.fleet_size_range();
        let fleet_size = rng.random_range(min_fleet..=max_fleet);
        debug!(line = %line.id, fleet_size, "placing vehicles");

        for i in 1..=fleet_size {
            let current_station = line
                .stations
                .choose(rng)
                .ok_or_else(|| {
                    CityPulseError::config(format!("transit line {} has no stations", line.id))
                })?
                .clone();

            let delay_minutes = sampling::gaussian(rng, delay_mean, delay_std).max(0.0);

            vehicles.push(TransitVehicleRecord {
                vehicle_id: format!("{}_train_{}", line.id.replace('-', "_"), i),
                line: line.id.clone(),
                direction: if rng.random_bool(0.5) {
                    Direction::Inbound
                } else {
                    Direction::Outbound
                },
                current_station,
                delay_minutes: round_to(delay_minutes, 1),
                crowding_level: *sampling::weighted_choice(rng, crowding)?,
                speed_mph: rng.random_range(15.0..=35.0),
                status: *sampling::weighted_choice(rng, &STATUS_WEIGHTS)?,
            });
        }
    }

    Ok(vehicles)
}

/// Mean and spread of the delay distribution for the current time bucket.
pub(crate) fn delay_params(ctx: &TemporalContext) -> (f64, f64) {
    if ctx.is_rush_hour() {
        (3.0, 2.0)
    } else if (10..=16).contains(&ctx.hour) {
        (1.0, 1.0)
    } else {
        (0.5, 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CityConfig;
    use chrono::{Local, TimeZone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    fn ctx(hour: u32, is_weekday: bool) -> TemporalContext {
        let ts = Local
            .with_ymd_and_hms(2024, 1, 1, hour, 0, 0)
            .single()
            .unwrap();
        TemporalContext {
            timestamp: ts,
            hour,
            is_weekday,
        }
    }

    #[rstest]
    #[case(8, (3.0, 2.0))] // morning rush
    #[case(18, (3.0, 2.0))] // evening rush
    #[case(12, (1.0, 1.0))] // shoulder hours
    #[case(2, (0.5, 0.5))] // overnight
    #[case(23, (0.5, 0.5))]
    fn test_delay_params_by_bucket(#[case] hour: u32, #[case] expected: (f64, f64)) {
        assert_eq!(delay_params(&ctx(hour, true)), expected);
    }

    #[test]
    fn test_fleet_sizes_follow_service_class() {
        let config = CityConfig::default();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let vehicles = generate(&config, &ctx(12, true), &mut rng).unwrap();
            for line in &config.transit_lines {
                let count = vehicles.iter().filter(|v| v.line == line.id).count() as u32;
                let (lo, hi) = line.service_class.fleet_size_range();
                assert!(
                    (lo..=hi).contains(&count),
                    "line {} had {count} vehicles",
                    line.id
                );
            }
        }
    }

    #[test]
    fn test_vehicle_fields_respect_bounds() {
        let config = CityConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let vehicles = generate(&config, &ctx(8, true), &mut rng).unwrap();
        assert!(!vehicles.is_empty());
        for vehicle in &vehicles {
            assert!(vehicle.delay_minutes >= 0.0);
            assert!((15.0..=35.0).contains(&vehicle.speed_mph));
            let line = config
                .transit_lines
                .iter()
                .find(|l| l.id == vehicle.line)
                .unwrap();
            assert!(line.stations.contains(&vehicle.current_station));
        }
    }

    #[test]
    fn test_crush_load_never_occurs_off_peak() {
        let config = CityConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let vehicles = generate(&config, &ctx(13, true), &mut rng).unwrap();
            assert!(
                vehicles
                    .iter()
                    .all(|v| v.crowding_level != CrowdingLevel::CrushedStandingRoomOnly)
            );
        }
    }

    #[test]
    fn test_crush_load_is_reachable_during_rush() {
        let config = CityConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut seen_crush = false;
        for _ in 0..50 {
            let vehicles = generate(&config, &ctx(8, true), &mut rng).unwrap();
            if vehicles
                .iter()
                .any(|v| v.crowding_level == CrowdingLevel::CrushedStandingRoomOnly)
            {
                seen_crush = true;
                break;
            }
        }
        assert!(seen_crush, "rush-hour crowding never reached crush load");
    }

    #[test]
    fn test_vehicle_ids_are_unique_within_a_refresh() {
        let config = CityConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let vehicles = generate(&config, &ctx(8, true), &mut rng).unwrap();
        let mut ids: Vec<&str> = vehicles.iter().map(|v| v.vehicle_id.as_str()).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(before, ids.len());
    }
}
