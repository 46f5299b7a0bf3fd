//! Aggregate views over generated records
//!
//! The KPI tiles and charts of the dashboard work from these aggregates
//! rather than recomputing them per widget. Every summary treats an empty
//! record collection as a legitimate "no current data" state and reports
//! zero sentinels instead of failing on the division.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AirQualityRecord, AqiCategory, CrowdingLevel, TrafficRecord, TransitVehicleRecord};

/// A location counts as a hotspot above this congestion level
const HOTSPOT_THRESHOLD: f64 = 0.6;

/// A vehicle counts as on time up to this delay
const ON_TIME_DELAY_MINUTES: f64 = 2.0;

/// A vehicle counts as a major delay above this
const MAJOR_DELAY_MINUTES: f64 = 5.0;

/// City-wide traffic aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficSummary {
    /// Mean congestion index across locations
    pub mean_congestion: f64,
    /// Mean speed across locations in mph
    pub mean_speed_mph: f64,
    /// Incidents summed across locations
    pub total_incidents: u32,
    /// Locations with congestion above the hotspot threshold
    pub hotspot_count: usize,
}

impl TrafficSummary {
    #[must_use]
    pub fn from_records(records: &[TrafficRecord]) -> Self {
        if records.is_empty() {
            return Self {
                mean_congestion: 0.0,
                mean_speed_mph: 0.0,
                total_incidents: 0,
                hotspot_count: 0,
            };
        }
        let n = records.len() as f64;
        Self {
            mean_congestion: records.iter().map(|r| r.congestion_index).sum::<f64>() / n,
            mean_speed_mph: records.iter().map(|r| r.average_speed_mph).sum::<f64>() / n,
            total_incidents: records.iter().map(|r| r.incident_count).sum(),
            hotspot_count: records
                .iter()
                .filter(|r| r.congestion_index > HOTSPOT_THRESHOLD)
                .count(),
        }
    }
}

/// Fleet-wide transit aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitSummary {
    /// Vehicles currently in service
    pub active_vehicles: usize,
    /// Fraction of vehicles within the on-time delay threshold; 0 when the
    /// fleet is empty
    pub on_time_pct: f64,
    /// Mean delay across the fleet in minutes
    pub mean_delay_minutes: f64,
    /// Vehicles past the major-delay threshold
    pub major_delay_count: usize,
    /// Mean delay per line
    pub line_delays: BTreeMap<String, f64>,
    /// Vehicle count per crowding level
    pub crowding_counts: BTreeMap<CrowdingLevel, usize>,
}

impl TransitSummary {
    #[must_use]
    pub fn from_records(records: &[TransitVehicleRecord]) -> Self {
        if records.is_empty() {
            return Self {
                active_vehicles: 0,
                on_time_pct: 0.0,
                mean_delay_minutes: 0.0,
                major_delay_count: 0,
                line_delays: BTreeMap::new(),
                crowding_counts: BTreeMap::new(),
            };
        }

        let n = records.len() as f64;
        let on_time = records
            .iter()
            .filter(|v| v.delay_minutes <= ON_TIME_DELAY_MINUTES)
            .count();

        let mut delay_totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut crowding_counts: BTreeMap<CrowdingLevel, usize> = BTreeMap::new();
        for vehicle in records {
            let entry = delay_totals.entry(vehicle.line.clone()).or_insert((0.0, 0));
            entry.0 += vehicle.delay_minutes;
            entry.1 += 1;
            *crowding_counts.entry(vehicle.crowding_level).or_insert(0) += 1;
        }
        let line_delays = delay_totals
            .into_iter()
            .map(|(line, (total, count))| (line, total / count as f64))
            .collect();

        Self {
            active_vehicles: records.len(),
            on_time_pct: on_time as f64 / n,
            mean_delay_minutes: records.iter().map(|v| v.delay_minutes).sum::<f64>() / n,
            major_delay_count: records
                .iter()
                .filter(|v| v.delay_minutes > MAJOR_DELAY_MINUTES)
                .count(),
            line_delays,
            crowding_counts,
        }
    }

    /// Line with the lowest mean delay, if any vehicles are running
    #[must_use]
    pub fn best_line(&self) -> Option<&str> {
        self.line_delays
            .iter()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(line, _)| line.as_str())
    }

    /// Line with the highest mean delay, if any vehicles are running
    #[must_use]
    pub fn worst_line(&self) -> Option<&str> {
        self.line_delays
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(line, _)| line.as_str())
    }
}

/// Region-wide air-quality aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualitySummary {
    /// Mean AQI across stations
    pub mean_aqi: f64,
    /// Stations currently in the Good band
    pub good_station_count: usize,
}

impl AirQualitySummary {
    #[must_use]
    pub fn from_records(records: &[AirQualityRecord]) -> Self {
        if records.is_empty() {
            return Self {
                mean_aqi: 0.0,
                good_station_count: 0,
            };
        }
        Self {
            mean_aqi: records.iter().map(|r| f64::from(r.aqi)).sum::<f64>() / records.len() as f64,
            good_station_count: records
                .iter()
                .filter(|r| r.category == AqiCategory::Good)
                .count(),
        }
    }
}
