//! Venue configuration loaded from TOML.
//!
//! The document declares the zones (in the order used for every tie-break),
//! the walkways between them, how booth numbers map to zones, and the knobs
//! of the query engine:
//!
//! ```toml
//! [venue]
//! name = "Salon Tech"
//! utc_offset_minutes = 60
//!
//! [[zones]]
//! id = "A"
//! display_name = "Hall Principal"
//! facilities = ["Accueil"]
//! keywords = ["accueil", "entrée"]
//!
//! [[edges]]
//! a = "A"
//! b = "B"
//! distance_meters = 50
//!
//! [booths]
//! rule = "prefix"
//! prefix_len = 1
//! ```

use chrono::{Duration, FixedOffset};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ModelError;
use crate::layout::{Zone, ZoneEdge, ZoneId};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct VenueInfo {
    #[serde(default)]
    pub name: String,
    /// Offset of the venue's local time from UTC, used for calendar-day queries.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// A zone as declared in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneConfig {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub facilities: Vec<String>,
    /// Free-text keywords resolving to this zone ("reception", "café").
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// How booth numbers are assigned to zones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum BoothRuleConfig {
    /// Zone is the first `prefix_len` characters of the booth number,
    /// optionally renamed through `zones` (prefix -> zone id).
    Prefix {
        #[serde(default = "default_prefix_len")]
        prefix_len: usize,
        #[serde(default)]
        zones: HashMap<String, String>,
    },
    /// Every booth is listed explicitly (booth -> zone id).
    Explicit { assignments: HashMap<String, String> },
}

fn default_prefix_len() -> usize {
    1
}

impl Default for BoothRuleConfig {
    fn default() -> Self {
        Self::Prefix {
            prefix_len: default_prefix_len(),
            zones: HashMap::new(),
        }
    }
}

/// Travel-time estimate for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TravelEstimate {
    /// Fixed minutes for every zone on the route, start and end included.
    PerHop { minutes_per_hop: u32 },
    /// Walking pace applied to the true route distance, rounded up.
    WalkingSpeed { meters_per_minute: u32 },
}

impl Default for TravelEstimate {
    fn default() -> Self {
        Self::PerHop { minutes_per_hop: 2 }
    }
}

impl TravelEstimate {
    /// Estimated minutes for a route visiting `zones_visited` zones over
    /// `distance_meters`.
    pub fn minutes(&self, zones_visited: usize, distance_meters: u32) -> u32 {
        match *self {
            TravelEstimate::PerHop { minutes_per_hop } => {
                minutes_per_hop.saturating_mul(zones_visited as u32)
            }
            TravelEstimate::WalkingSpeed { meters_per_minute } => {
                distance_meters.div_ceil(meters_per_minute.max(1))
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    #[serde(default = "default_same_zone_min")]
    pub same_zone_min_meters: u32,
    #[serde(default = "default_same_zone_max")]
    pub same_zone_max_meters: u32,
    #[serde(default)]
    pub estimate: TravelEstimate,
}

fn default_same_zone_min() -> u32 {
    20
}

fn default_same_zone_max() -> u32 {
    30
}

impl RoutingConfig {
    /// Reject an inverted same-zone band or a zero walking speed.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.same_zone_min_meters > self.same_zone_max_meters {
            return Err(ModelError::Invalid(format!(
                "same-zone distance band is inverted ({} > {})",
                self.same_zone_min_meters, self.same_zone_max_meters
            )));
        }
        if let TravelEstimate::WalkingSpeed {
            meters_per_minute: 0,
        } = self.estimate
        {
            return Err(ModelError::Invalid(
                "walking speed must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            same_zone_min_meters: default_same_zone_min(),
            same_zone_max_meters: default_same_zone_max(),
            estimate: TravelEstimate::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProximityConfig {
    /// Maximum exhibitors listed for a zone before reporting an overflow count.
    #[serde(default = "default_exhibitor_limit")]
    pub exhibitor_limit: usize,
}

fn default_exhibitor_limit() -> usize {
    5
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            exhibitor_limit: default_exhibitor_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Events starting within this many minutes are "starting soon".
    #[serde(default = "default_soon_threshold")]
    pub soon_threshold_minutes: i64,
}

fn default_soon_threshold() -> i64 {
    60
}

impl ScheduleConfig {
    /// The "soon" threshold as a duration. Fails when it is negative or does
    /// not fit a `chrono::Duration`.
    pub fn soon_threshold(&self) -> Result<Duration, ModelError> {
        if self.soon_threshold_minutes < 0 {
            return Err(ModelError::Invalid(
                "soon threshold must not be negative".to_string(),
            ));
        }
        Duration::try_minutes(self.soon_threshold_minutes).ok_or_else(|| {
            ModelError::Invalid(format!(
                "soon threshold out of range: {} minutes",
                self.soon_threshold_minutes
            ))
        })
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            soon_threshold_minutes: default_soon_threshold(),
        }
    }
}

/// The complete venue configuration document.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct VenueConfig {
    #[serde(default)]
    pub venue: VenueInfo,
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
    #[serde(default)]
    pub edges: Vec<ZoneEdge>,
    #[serde(default)]
    pub booths: BoothRuleConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub proximity: ProximityConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl VenueConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ModelError> {
        let config: VenueConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path.as_ref()).map_err(ModelError::ReadFile)?;
        Self::from_toml_str(&content)
    }

    /// Check the scalar settings. Graph-level checks happen when the engine
    /// builds its snapshot.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.routing.validate()?;
        if let BoothRuleConfig::Prefix { prefix_len: 0, .. } = self.booths {
            return Err(ModelError::Invalid(
                "booth prefix length must be positive".to_string(),
            ));
        }
        self.schedule.soon_threshold()?;
        self.utc_offset()?;
        Ok(())
    }

    /// The venue's local time offset.
    pub fn utc_offset(&self) -> Result<FixedOffset, ModelError> {
        FixedOffset::east_opt(self.venue.utc_offset_minutes.saturating_mul(60)).ok_or_else(|| {
            ModelError::Invalid(format!(
                "utc offset out of range: {} minutes",
                self.venue.utc_offset_minutes
            ))
        })
    }

    /// Zones in declared order.
    pub fn layout_zones(&self) -> Vec<Zone> {
        self.zones
            .iter()
            .map(|z| {
                Zone::new(z.id.clone(), z.display_name.clone())
                    .with_facilities(z.facilities.iter().cloned())
            })
            .collect()
    }

    /// Keyword table (zone -> keywords), in declared zone order.
    pub fn keyword_table(&self) -> Vec<(ZoneId, Vec<String>)> {
        self.zones
            .iter()
            .filter(|z| !z.keywords.is_empty())
            .map(|z| (ZoneId::new(z.id.clone()), z.keywords.clone()))
            .collect()
    }
}
