//! Record types produced by the generators
//!
//! Every type here is a plain value object: produced fresh each refresh,
//! owned by the caller, never mutated after creation, never shared across
//! refreshes. The presentation layer consumes them read-only.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::temporal::TemporalContext;

/// Congestion and flow state for one monitored road location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficRecord {
    /// Monitored location name (e.g. "Tobin Bridge")
    pub location: String,
    /// Neighborhood the location belongs to
    pub neighborhood: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Normalized congestion, 0.0 = free-flow, 1.0 = gridlock
    pub congestion_index: f64,
    /// Mean traffic speed derived from congestion
    pub average_speed_mph: f64,
    /// Active incidents at this location
    pub incident_count: u32,
    /// Expected delay through this location
    pub delay_minutes: f64,
    /// Active special event near this location, if any
    pub special_event: Option<String>,
    /// Vehicles per hour
    pub traffic_volume: u32,
}

/// Travel direction of a transit vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Inbound,
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => write!(f, "Inbound"),
            Direction::Outbound => write!(f, "Outbound"),
        }
    }
}

/// Ordered occupancy state of a transit vehicle, least to most crowded.
///
/// The tags mirror the GTFS-realtime occupancy vocabulary used by the MBTA
/// feed this data imitates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrowdingLevel {
    ManySeatsAvailable,
    FewSeatsAvailable,
    StandingRoomOnly,
    CrushedStandingRoomOnly,
}

impl fmt::Display for CrowdingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CrowdingLevel::ManySeatsAvailable => "Many seats available",
            CrowdingLevel::FewSeatsAvailable => "Few seats available",
            CrowdingLevel::StandingRoomOnly => "Standing room only",
            CrowdingLevel::CrushedStandingRoomOnly => "Crushed standing room only",
        };
        write!(f, "{label}")
    }
}

/// Service status of a transit vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Approaching,
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::OnTime => write!(f, "On Time"),
            VehicleStatus::Delayed => write!(f, "Delayed"),
            VehicleStatus::Approaching => write!(f, "Approaching"),
        }
    }
}

/// State of one transit vehicle on one line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitVehicleRecord {
    /// Synthetic vehicle identifier (e.g. "Red_train_3")
    pub vehicle_id: String,
    /// Line the vehicle runs on
    pub line: String,
    pub direction: Direction,
    /// Station the vehicle is currently at or nearest to
    pub current_station: String,
    /// Delay relative to schedule, floored at zero
    pub delay_minutes: f64,
    pub crowding_level: CrowdingLevel,
    /// Current speed in mph
    pub speed_mph: f64,
    pub status: VehicleStatus,
}

/// EPA-style AQI health category, a pure function of the index value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
}

impl AqiCategory {
    /// Classify an AQI value using the fixed EPA breakpoints
    #[must_use]
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
            151..=200 => AqiCategory::Unhealthy,
            _ => AqiCategory::VeryUnhealthy,
        }
    }

    /// Display color associated with this category
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "green",
            AqiCategory::Moderate => "yellow",
            AqiCategory::UnhealthyForSensitiveGroups => "orange",
            AqiCategory::Unhealthy => "red",
            AqiCategory::VeryUnhealthy => "purple",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
        };
        write!(f, "{label}")
    }
}

/// Pollution reading for one monitoring station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityRecord {
    /// Station name
    pub station: String,
    /// Station type tag used for the baseline lookup (e.g. "highway")
    pub station_type: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Air Quality Index, clamped to 0-300
    pub aqi: u16,
    /// Health category derived from `aqi`
    pub category: AqiCategory,
    /// Map marker color derived from `category`
    pub color: String,
    /// Fine particulate matter in µg/m³
    pub pm25: f64,
    /// Coarse particulate matter in µg/m³
    pub pm10: f64,
    /// Nitrogen dioxide in ppb
    pub no2: f64,
    /// Ozone in ppb
    pub o3: f64,
    /// Weather condition applied to this reading
    pub weather_condition: String,
}

/// Aggregate grid state for the whole region, one per refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergySnapshot {
    /// Total demand in megawatts
    pub total_demand_mw: f64,
    /// Renewable share of generation (0.0-1.0)
    pub renewable_pct: f64,
    /// Nuclear share of generation (0.0-1.0)
    pub nuclear_pct: f64,
    /// Natural-gas share of generation (0.0-1.0)
    pub natural_gas_pct: f64,
    /// Remaining share; the four shares always sum to 1
    pub other_pct: f64,
    /// Grid frequency in Hz, nominally 60
    pub grid_frequency_hz: f64,
    /// Demand as a fraction of estimated peak capacity
    pub peak_load_ratio: f64,
    /// Active outages in the region
    pub outage_count: u32,
    /// Ambient temperature in Fahrenheit
    pub temperature_f: f64,
}

/// One full refresh cycle's output, handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySnapshot {
    /// Temporal context the snapshot was generated under; its timestamp is
    /// the moment of the refresh
    pub context: TemporalContext,
    pub traffic: Vec<TrafficRecord>,
    pub transit: Vec<TransitVehicleRecord>,
    pub air_quality: Vec<AirQualityRecord>,
    pub energy: EnergySnapshot,
}
