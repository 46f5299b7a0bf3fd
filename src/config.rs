//! Reference configuration for the `CityPulse` engine
//!
//! Static geographic and topological data the generators consume but never
//! modify: monitored road locations, transit line topologies, air-quality
//! stations with their baseline table, and grid parameters. Built once at
//! startup and passed by reference into every generator call; the default
//! carries the Greater Boston dataset, and the whole structure can be loaded
//! from a JSON file instead.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

use crate::CityPulseError;

/// Geographic bounding box for the monitored region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Map center as (latitude, longitude)
    pub center: (f64, f64),
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// A monitored road location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub neighborhood: String,
}

/// Service frequency class of a transit line, which sets its fleet size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceClass {
    /// Heavy-rail trunk lines with the largest fleets
    HighFrequency,
    /// Mid-size fleet
    Medium,
    /// Branch lines with the smallest fleets
    Standard,
}

impl ServiceClass {
    /// Inclusive fleet-size range for one refresh
    #[must_use]
    pub fn fleet_size_range(&self) -> (u32, u32) {
        match self {
            ServiceClass::HighFrequency => (15, 25),
            ServiceClass::Medium => (8, 12),
            ServiceClass::Standard => (6, 10),
        }
    }
}

/// Topology of one transit line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineTopology {
    /// Line identifier (e.g. "Red", "Green-B")
    pub id: String,
    /// Display color as a hex string, presentational only
    pub color: String,
    pub service_class: ServiceClass,
    /// Stations in line order; the order is presentational, vehicle placement
    /// picks uniformly from the set
    pub stations: Vec<String>,
}

/// An air-quality monitoring station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringStation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Type tag keying into the baseline table (e.g. "highway")
    pub station_type: String,
}

/// A venue that can host congestion-boosting special events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventVenue {
    /// Must match a `ReferenceLocation` name
    pub location: String,
    /// Tag attached to the traffic record while the event is active
    pub description: String,
    /// Per-refresh probability of an active event (0.0-1.0)
    pub probability: f64,
}

/// Location-based tuning for the traffic generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficTuning {
    /// Locations that get the ×1.2 high-activity multiplier
    pub high_activity_locations: Vec<String>,
    /// Neighborhoods that get the ×0.8 suburban multiplier
    pub suburban_neighborhoods: Vec<String>,
    /// Venues with independent special-event chances
    pub event_venues: Vec<EventVenue>,
}

/// Grid parameters for the energy generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyParams {
    /// Baseline regional load in megawatts
    pub base_load_mw: f64,
    /// Ambient temperature draw range in Celsius (lo, hi)
    pub temperature_range_c: (f64, f64),
    /// Above this temperature, cooling load adds to the demand multiplier
    pub cooling_threshold_c: f64,
    /// Below this temperature, heating load adds to the demand multiplier
    pub heating_threshold_c: f64,
    /// Renewable generation share draw range
    pub renewable_range: (f64, f64),
    /// Nuclear generation share draw range
    pub nuclear_range: (f64, f64),
    /// Natural-gas generation share draw range
    pub gas_range: (f64, f64),
}

/// Root reference configuration
///
/// Injected once, read-only for the lifetime of the process. No generator
/// reads any ambient or global state besides this structure and the
/// per-refresh [`TemporalContext`](crate::TemporalContext).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityConfig {
    pub bounds: GeoBounds,
    pub traffic_locations: Vec<ReferenceLocation>,
    pub transit_lines: Vec<LineTopology>,
    pub aqi_stations: Vec<MonitoringStation>,
    /// Base pollutant index per station type tag
    pub station_baselines: HashMap<String, u16>,
    /// Baseline used when a station type is missing from the table
    pub default_station_baseline: u16,
    pub traffic: TrafficTuning,
    pub energy: EnergyParams,
}

impl CityConfig {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Check the structural invariants the generators rely on
    pub fn validate(&self) -> crate::Result<()> {
        if self.traffic_locations.is_empty() {
            return Err(CityPulseError::config("no traffic locations configured"));
        }
        for line in &self.transit_lines {
            if line.stations.is_empty() {
                return Err(CityPulseError::config(format!(
                    "transit line {} has no stations",
                    line.id
                )));
            }
        }
        for venue in &self.traffic.event_venues {
            if !(0.0..=1.0).contains(&venue.probability) {
                return Err(CityPulseError::config(format!(
                    "event probability for {} out of range: {}",
                    venue.location, venue.probability
                )));
            }
        }
        let ranges = [
            ("temperature", self.energy.temperature_range_c),
            ("renewable", self.energy.renewable_range),
            ("nuclear", self.energy.nuclear_range),
            ("gas", self.energy.gas_range),
        ];
        for (name, (lo, hi)) in ranges {
            if lo > hi {
                return Err(CityPulseError::config(format!(
                    "{name} range is inverted: ({lo}, {hi})"
                )));
            }
        }
        if self.energy.base_load_mw <= 0.0 {
            return Err(CityPulseError::config("base load must be positive"));
        }
        Ok(())
    }

    /// Base pollutant index for a station type, with the documented fallback
    /// for unknown tags
    #[must_use]
    pub fn base_pollutant_index(&self, station_type: &str) -> u16 {
        match self.station_baselines.get(station_type) {
            Some(base) => *base,
            None => {
                warn!(
                    station_type,
                    default = self.default_station_baseline,
                    "unknown station type, using default baseline"
                );
                self.default_station_baseline
            }
        }
    }
}

fn location(name: &str, lat: f64, lon: f64, neighborhood: &str) -> ReferenceLocation {
    ReferenceLocation {
        name: name.to_string(),
        latitude: lat,
        longitude: lon,
        neighborhood: neighborhood.to_string(),
    }
}

fn line(id: &str, color: &str, class: ServiceClass, stations: &[&str]) -> LineTopology {
    LineTopology {
        id: id.to_string(),
        color: color.to_string(),
        service_class: class,
        stations: stations.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn station(name: &str, lat: f64, lon: f64, station_type: &str) -> MonitoringStation {
    MonitoringStation {
        name: name.to_string(),
        latitude: lat,
        longitude: lon,
        station_type: station_type.to_string(),
    }
}

impl Default for CityConfig {
    /// Greater Boston reference dataset
    fn default() -> Self {
        let traffic_locations = vec![
            // Downtown Boston
            location("Downtown Crossing", 42.3555, -71.0604, "Downtown"),
            location("Government Center", 42.3594, -71.0587, "Downtown"),
            location("Financial District", 42.3583, -71.0552, "Downtown"),
            location("Back Bay Station", 42.3477, -71.0752, "Back Bay"),
            location("Copley Square", 42.3495, -71.0773, "Back Bay"),
            // Major bridges and highways
            location("Tobin Bridge", 42.3823, -71.0370, "North End"),
            location("Zakim Bridge", 42.3679, -71.0611, "North End"),
            location("Mass Ave Bridge", 42.3530, -71.0919, "Back Bay"),
            location("Longfellow Bridge", 42.3611, -71.0758, "Beacon Hill"),
            location("I-93 South", 42.3301, -71.0589, "South End"),
            location("I-90 (Mass Pike)", 42.3467, -71.0972, "Fenway"),
            location("Route 1 North", 42.3756, -71.0342, "Charlestown"),
            // Cambridge
            location("Harvard Square", 42.3744, -71.1190, "Cambridge"),
            location("Kendall Square", 42.3625, -71.0861, "Cambridge"),
            location("Porter Square", 42.3884, -71.1192, "Cambridge"),
            location("Lechmere", 42.3701, -71.0761, "Cambridge"),
            // Other areas
            location("Logan Airport", 42.3656, -71.0096, "East Boston"),
            location("Fenway Park", 42.3467, -71.0972, "Fenway"),
            location("TD Garden", 42.3662, -71.0621, "North End"),
            location("Brookline Village", 42.3326, -71.1205, "Brookline"),
            location("Newton Centre", 42.3292, -71.1925, "Newton"),
            location("Quincy Center", 42.2519, -71.0052, "Quincy"),
        ];

        let transit_lines = vec![
            line(
                "Red",
                "#DA020E",
                ServiceClass::HighFrequency,
                &[
                    "Braintree",
                    "Quincy Center",
                    "South Station",
                    "Park Street",
                    "Harvard",
                    "Porter",
                    "Alewife",
                ],
            ),
            line(
                "Orange",
                "#ED8B00",
                ServiceClass::HighFrequency,
                &[
                    "Forest Hills",
                    "Back Bay",
                    "Downtown Crossing",
                    "State",
                    "North Station",
                    "Oak Grove",
                ],
            ),
            line(
                "Blue",
                "#003DA5",
                ServiceClass::Medium,
                &[
                    "Wonderland",
                    "Airport",
                    "Maverick",
                    "State",
                    "Government Center",
                    "Bowdoin",
                ],
            ),
            line(
                "Green-B",
                "#00843D",
                ServiceClass::Standard,
                &[
                    "Boston College",
                    "Cleveland Circle",
                    "Kenmore",
                    "Park Street",
                    "Government Center",
                ],
            ),
            line(
                "Green-C",
                "#00843D",
                ServiceClass::Standard,
                &[
                    "Cleveland Circle",
                    "Coolidge Corner",
                    "Kenmore",
                    "Park Street",
                    "North Station",
                ],
            ),
            line(
                "Green-D",
                "#00843D",
                ServiceClass::Standard,
                &[
                    "Riverside",
                    "Newton Highlands",
                    "Brookline Hills",
                    "Kenmore",
                    "Park Street",
                    "North Station",
                ],
            ),
            line(
                "Green-E",
                "#00843D",
                ServiceClass::Standard,
                &[
                    "Heath Street",
                    "Northeastern",
                    "Back Bay",
                    "Park Street",
                    "North Station",
                ],
            ),
        ];

        let aqi_stations = vec![
            station("Boston Common", 42.3549, -71.0649, "urban_park"),
            station("Harvard University", 42.3770, -71.1167, "institutional"),
            station("Logan Airport", 42.3656, -71.0096, "transportation"),
            station("I-93 Corridor", 42.3301, -71.0589, "highway"),
            station("Financial District", 42.3583, -71.0552, "business"),
            station("Cambridge Riverside", 42.3601, -71.0942, "residential"),
            station("Brookline Hills", 42.3319, -71.1289, "suburban"),
            station("Quincy Adams", 42.2331, -71.0070, "suburban"),
        ];

        let station_baselines = HashMap::from([
            ("urban_park".to_string(), 40),
            ("suburban".to_string(), 35),
            ("residential".to_string(), 45),
            ("business".to_string(), 55),
            ("highway".to_string(), 65),
            ("transportation".to_string(), 70),
            ("institutional".to_string(), 40),
        ]);

        let traffic = TrafficTuning {
            high_activity_locations: vec![
                "Harvard Square".to_string(),
                "Kendall Square".to_string(),
                "Downtown Crossing".to_string(),
            ],
            suburban_neighborhoods: vec![
                "Newton".to_string(),
                "Brookline".to_string(),
                "Quincy".to_string(),
            ],
            event_venues: vec![
                EventVenue {
                    location: "Fenway Park".to_string(),
                    description: "Red Sox Game".to_string(),
                    probability: 0.1,
                },
                EventVenue {
                    location: "TD Garden".to_string(),
                    description: "Bruins/Celtics Game".to_string(),
                    probability: 0.1,
                },
            ],
        };

        let energy = EnergyParams {
            base_load_mw: 2500.0,
            temperature_range_c: (15.0, 30.0),
            cooling_threshold_c: 27.0,
            heating_threshold_c: 5.0,
            renewable_range: (0.25, 0.40),
            nuclear_range: (0.20, 0.30),
            gas_range: (0.35, 0.45),
        };

        Self {
            bounds: GeoBounds {
                center: (42.3601, -71.0589),
                north: 42.4820,
                south: 42.2279,
                east: -70.9239,
                west: -71.3683,
            },
            traffic_locations,
            transit_lines,
            aqi_stations,
            station_baselines,
            default_station_baseline: 50,
            traffic,
            energy,
        }
    }
}
