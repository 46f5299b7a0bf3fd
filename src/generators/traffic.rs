//! Traffic generator
//!
//! Produces one [`TrafficRecord`] per monitored location. Congestion is a
//! time-bucket base level, scaled by a location multiplier, plus Gaussian
//! noise, clamped to [0, 1]. Speed, incidents, and delay derive from the
//! congestion index; traffic volume is an independent uniform draw (a
//! simplification, not a derived quantity).

use rand::Rng;
use tracing::debug;

use crate::config::{CityConfig, ReferenceLocation, TrafficTuning};
use crate::generators::round_to;
use crate::models::TrafficRecord;
use crate::sampling;
use crate::temporal::TemporalContext;

/// Congestion floor applied at every hour of every day
const BASE_FLOOR: f64 = 0.2;

/// Spread of the Gaussian noise added to each location's congestion
const CONGESTION_NOISE_STD: f64 = 0.1;

/// Congestion added on top of a special-event venue's normal level
const EVENT_CONGESTION_BOOST: f64 = 0.3;

/// Generate one record per configured traffic location.
pub fn generate<R>(
    config: &CityConfig,
    ctx: &TemporalContext,
    rng: &mut R,
) -> Vec<TrafficRecord>
where
    R: Rng + ?Sized,
{
    let base = base_congestion(ctx);
    let mut records = Vec::with_capacity(config.traffic_locations.len());

    for location in &config.traffic_locations {
        let multiplier = location_multiplier(&config.traffic, location);
        let mut congestion = (base * multiplier
            + sampling::gaussian(rng, 0.0, CONGESTION_NOISE_STD))
        .clamp(0.0, 1.0);

        // Derived metrics use the pre-event congestion level; an event boosts
        // the index itself but does not retroactively slow the reading.
        let average_speed_mph = 35.0 * (1.0 - congestion);
        let incident_count = sampling::poisson(rng, congestion * 2.0);
        let delay_minutes = congestion * 15.0;

        let mut special_event = None;
        if let Some(venue) = config
            .traffic
            .event_venues
            .iter()
            .find(|v| v.location == location.name)
        {
            if rng.random_bool(venue.probability.clamp(0.0, 1.0)) {
                debug!(venue = %venue.location, event = %venue.description, "special event active");
                special_event = Some(venue.description.clone());
                congestion = (congestion + EVENT_CONGESTION_BOOST).min(1.0);
            }
        }

        records.push(TrafficRecord {
            location: location.name.clone(),
            neighborhood: location.neighborhood.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            congestion_index: round_to(congestion, 3),
            average_speed_mph: round_to(average_speed_mph, 1),
            incident_count,
            delay_minutes: round_to(delay_minutes, 1),
            special_event,
            traffic_volume: rng.random_range(500..=3000),
        });
    }

    records
}

/// Time-bucket base congestion, before the location multiplier and noise.
///
/// Weekday buckets: morning rush +0.5, evening rush +0.6, business hours
/// +0.3, evening activity +0.2. Weekend buckets: midday +0.3, nightlife +0.4.
/// The 0.2 floor applies everywhere.
pub(crate) fn base_congestion(ctx: &TemporalContext) -> f64 {
    let bucket = if ctx.is_weekday {
        match ctx.hour {
            7..=9 => 0.5,
            17..=19 => 0.6,
            10..=16 => 0.3,
            20..=22 => 0.2,
            _ => 0.0,
        }
    } else {
        match ctx.hour {
            11..=15 => 0.3,
            19..=23 => 0.4,
            _ => 0.0,
        }
    };
    BASE_FLOOR + bucket
}

/// Location multiplier: bridges are bottlenecks, the named squares draw
/// crowds, airports add steady background traffic, and the suburban
/// neighborhoods run lighter than the core.
pub(crate) fn location_multiplier(tuning: &TrafficTuning, location: &ReferenceLocation) -> f64 {
    if location.name.contains("Bridge") {
        1.3
    } else if tuning
        .high_activity_locations
        .iter()
        .any(|name| *name == location.name)
    {
        1.2
    } else if location.name.contains("Airport") {
        1.1
    } else if tuning
        .suburban_neighborhoods
        .iter()
        .any(|hood| *hood == location.neighborhood)
    {
        0.8
    } else {
        1.0
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
        // Day of month only matters for is_weekday, which is set explicitly
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
    #[case(8, true, 0.7)] // morning rush: floor + 0.5
    #[case(18, true, 0.8)] // evening rush: floor + 0.6
    #[case(13, true, 0.5)] // business hours: floor + 0.3
    #[case(21, true, 0.4)] // evening activity: floor + 0.2
    #[case(3, true, 0.2)] // weekday night: floor only
    #[case(12, false, 0.5)] // weekend midday: floor + 0.3
    #[case(20, false, 0.6)] // weekend nightlife: floor + 0.4
    #[case(2, false, 0.2)] // weekend night: floor only
    fn test_base_congestion_buckets(
        #[case] hour: u32,
        #[case] is_weekday: bool,
        #[case] expected: f64,
    ) {
        let result = base_congestion(&ctx(hour, is_weekday));
        assert!((result - expected).abs() < 1e-9, "got {result}");
    }

    #[test]
    fn test_location_multipliers() {
        let config = CityConfig::default();
        let tuning = &config.traffic;
        let get = |name: &str| {
            let loc = config
                .traffic_locations
                .iter()
                .find(|l| l.name == name)
                .unwrap();
            location_multiplier(tuning, loc)
        };

        assert_eq!(get("Tobin Bridge"), 1.3);
        assert_eq!(get("Harvard Square"), 1.2);
        assert_eq!(get("Logan Airport"), 1.1);
        assert_eq!(get("Newton Centre"), 0.8);
        assert_eq!(get("Government Center"), 1.0);
    }

    #[test]
    fn test_records_respect_bounds() {
        let config = CityConfig::default();
        for seed in 0..25 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let records = generate(&config, &ctx(18, true), &mut rng);
            assert_eq!(records.len(), config.traffic_locations.len());
            for record in &records {
                assert!((0.0..=1.0).contains(&record.congestion_index));
                assert!(record.average_speed_mph >= 0.0);
                assert!((500..=3000).contains(&record.traffic_volume));
                assert!(record.delay_minutes >= 0.0);
            }
        }
    }

    #[test]
    fn test_special_events_only_at_venues() {
        let config = CityConfig::default();
        let venues: Vec<&str> = config
            .traffic
            .event_venues
            .iter()
            .map(|v| v.location.as_str())
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let records = generate(&config, &ctx(18, true), &mut rng);
            for record in records {
                if record.special_event.is_some() {
                    assert!(venues.contains(&record.location.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic_for_a_fixed_seed() {
        let config = CityConfig::default();
        let context = ctx(8, true);
        let run = || {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            generate(&config, &context, &mut rng)
        };
        let a = serde_json::to_string(&run()).unwrap();
        let b = serde_json::to_string(&run()).unwrap();
        assert_eq!(a, b);
    }
}
