//! Air-quality generator
//!
//! Produces one [`AirQualityRecord`] per monitoring station. The AQI starts
//! from the station type's baseline, takes a rush-hour traffic boost, a
//! weather modifier (rain and wind clean the air, cloud cover traps it), and
//! a final jitter, then clamps to [0, 300]. PM2.5 and PM10 track the AQI;
//! NO2 and O3 are independent uniform draws (a documented simplification).

use rand::Rng;

use crate::config::CityConfig;
use crate::generators::round_to;
use crate::models::{AirQualityRecord, AqiCategory};
use crate::temporal::TemporalContext;

/// Weather conditions and their additive AQI modifiers, drawn uniformly.
const WEATHER_CONDITIONS: [(&str, i32); 5] = [
    ("Clear", 0),
    ("Partly Cloudy", 5),
    ("Overcast", 10),
    ("Light Rain", -15),
    ("Windy", -10),
];

/// Generate one record per configured monitoring station.
pub fn generate<R>(
    config: &CityConfig,
    ctx: &TemporalContext,
    rng: &mut R,
) -> Vec<AirQualityRecord>
where
    R: Rng + ?Sized,
{
    let mut records = Vec::with_capacity(config.aqi_stations.len());

    for station in &config.aqi_stations {
        let mut index = i32::from(config.base_pollutant_index(&station.station_type));

        if ctx.is_rush_hour() {
            index += rng.random_range(10..=25);
        }

        let (condition, modifier) =
            WEATHER_CONDITIONS[rng.random_range(0..WEATHER_CONDITIONS.len())];
        index += modifier;
        index += rng.random_range(-10..=15);

        let aqi = index.clamp(0, 300) as u16;
        let category = AqiCategory::from_aqi(aqi);

        records.push(AirQualityRecord {
            station: station.name.clone(),
            station_type: station.station_type.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            aqi,
            category,
            color: category.color().to_string(),
            pm25: round_to(f64::from(aqi) * 0.4 + rng.random_range(-5.0..=5.0), 1),
            pm10: round_to(f64::from(aqi) * 0.7 + rng.random_range(-8.0..=8.0), 1),
            no2: round_to(rng.random_range(10.0..=50.0), 1),
            o3: round_to(rng.random_range(15.0..=80.0), 1),
            weather_condition: condition.to_string(),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CityConfig, MonitoringStation};
    use chrono::{Local, TimeZone};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

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

    #[test]
    fn test_aqi_stays_in_bounds_across_seeds() {
        let config = CityConfig::default();
        for seed in 0..25 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let records = generate(&config, &ctx(8, true), &mut rng);
            assert_eq!(records.len(), config.aqi_stations.len());
            for record in records {
                assert!(record.aqi <= 300);
                assert_eq!(record.category, AqiCategory::from_aqi(record.aqi));
                assert_eq!(record.color, record.category.color());
            }
        }
    }

    #[test]
    fn test_weather_condition_comes_from_the_fixed_table() {
        let config = CityConfig::default();
        let known: Vec<&str> = WEATHER_CONDITIONS.iter().map(|(name, _)| *name).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let records = generate(&config, &ctx(14, true), &mut rng);
        for record in records {
            assert!(known.contains(&record.weather_condition.as_str()));
        }
    }

    #[test]
    fn test_rush_hour_raises_the_average_index() {
        let config = CityConfig::default();
        let mean_aqi = |hour: u32| -> f64 {
            let mut total = 0u32;
            let mut count = 0u32;
            for seed in 0..40 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                for record in generate(&config, &ctx(hour, true), &mut rng) {
                    total += u32::from(record.aqi);
                    count += 1;
                }
            }
            f64::from(total) / f64::from(count)
        };

        // The rush boost is +10..=25, well above the noise floor over 320 draws
        assert!(mean_aqi(8) > mean_aqi(3) + 5.0);
    }

    #[test]
    fn test_unknown_station_type_uses_default_baseline() {
        let mut config = CityConfig::default();
        config.aqi_stations = vec![MonitoringStation {
            name: "Mystery Site".to_string(),
            latitude: 42.0,
            longitude: -71.0,
            station_type: "orbital".to_string(),
        }];

        // Overnight, clear-weather draws stay within jitter of the default 50
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let records = generate(&config, &ctx(3, true), &mut rng);
            let record = &records[0];
            // default 50, worst case modifiers: -15 - 10 .. +10 + 15
            assert!((25..=75).contains(&record.aqi));
        }
    }
}
