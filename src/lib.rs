//! `CityPulse` - Synthetic smart-city metrics for the Greater Boston dashboard
//!
//! This library generates plausible, internally-consistent synthetic records
//! for a multi-domain city-monitoring display (road traffic, transit
//! vehicles, air quality, power grid) in the absence of live sensor feeds.
//! Each refresh captures a [`TemporalContext`], then runs four independent
//! generators against an immutable [`CityConfig`] and an injected random
//! source; rendering the output is the presentation layer's business.

pub mod config;
pub mod error;
pub mod generators;
pub mod models;
pub mod sampling;
pub mod summary;
pub mod temporal;

// Re-export core types for public API
pub use config::{CityConfig, LineTopology, MonitoringStation, ReferenceLocation, ServiceClass};
pub use error::CityPulseError;
pub use generators::generate_snapshot;
pub use models::{
    AirQualityRecord, AqiCategory, CitySnapshot, CrowdingLevel, Direction, EnergySnapshot,
    TrafficRecord, TransitVehicleRecord, VehicleStatus,
};
pub use summary::{AirQualitySummary, TrafficSummary, TransitSummary};
pub use temporal::TemporalContext;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CityPulseError>;
