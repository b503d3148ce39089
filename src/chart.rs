//! Chart assembly and the end-to-end pipeline.
//!
//! [`compute_chart`] runs time conversion, ephemeris, ayanamsa, zodiac
//! placement, house geometry and aspect detection in that order, then hands
//! the pieces to [`assemble`], which only aggregates and checks consistency.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::angles::{normalize_angle, FULL_CIRCLE};
use crate::aspects::detect_aspects;
use crate::ayanamsa;
use crate::config::ChartConfig;
use crate::ephemeris;
use crate::error::{ChartError, Result};
use crate::houses::{self, HOUSE_COUNT};
use crate::time;
use crate::types::{
    Aspect, Body, BodyPosition, ChartGeometry, ChartRequest, GeoLocation, HouseCusp, PlacedBody,
    TimeContext,
};
use crate::zodiac::{self, SIGN_WIDTH};

const CUSP_TOLERANCE: f64 = 1e-9;

/// A verified chart. Deserialized records go through [`validate`] as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChartRecord")]
pub struct Chart {
    local_datetime: NaiveDateTime,
    timezone: String,
    utc: DateTime<Utc>,
    julian_day: f64,
    ayanamsa: f64,
    ascendant: f64,
    tropical_ascendant: f64,
    midheaven: f64,
    bodies: Vec<PlacedBody>,
    cusps: Vec<HouseCusp>,
    aspects: Vec<Aspect>,
}

// Unchecked wire form of `Chart`.
#[derive(Deserialize)]
struct ChartRecord {
    local_datetime: NaiveDateTime,
    timezone: String,
    utc: DateTime<Utc>,
    julian_day: f64,
    ayanamsa: f64,
    ascendant: f64,
    tropical_ascendant: f64,
    midheaven: f64,
    bodies: Vec<PlacedBody>,
    cusps: Vec<HouseCusp>,
    aspects: Vec<Aspect>,
}

impl TryFrom<ChartRecord> for Chart {
    type Error = ChartError;

    fn try_from(record: ChartRecord) -> Result<Self> {
        let chart = Chart {
            local_datetime: record.local_datetime,
            timezone: record.timezone,
            utc: record.utc,
            julian_day: record.julian_day,
            ayanamsa: record.ayanamsa,
            ascendant: record.ascendant,
            tropical_ascendant: record.tropical_ascendant,
            midheaven: record.midheaven,
            bodies: record.bodies,
            cusps: record.cusps,
            aspects: record.aspects,
        };
        validate(&chart)?;
        Ok(chart)
    }
}

impl Chart {
    pub fn local_datetime(&self) -> NaiveDateTime {
        self.local_datetime
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn julian_day(&self) -> f64 {
        self.julian_day
    }

    pub fn ayanamsa(&self) -> f64 {
        self.ayanamsa
    }

    /// Sidereal ascendant.
    pub fn ascendant(&self) -> f64 {
        self.ascendant
    }

    pub fn tropical_ascendant(&self) -> f64 {
        self.tropical_ascendant
    }

    /// Sidereal midheaven.
    pub fn midheaven(&self) -> f64 {
        self.midheaven
    }

    pub fn bodies(&self) -> &[PlacedBody] {
        &self.bodies
    }

    pub fn body(&self, body: Body) -> Option<&PlacedBody> {
        self.bodies.iter().find(|b| b.position.body == body)
    }

    pub fn cusps(&self) -> &[HouseCusp] {
        &self.cusps
    }

    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a chart previously written by [`Chart::to_json`]. The record
    /// must pass the same integrity checks as a freshly assembled chart.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<f64> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(ChartError::CoordinateRange { field, value })
    }
}

/// Validate request coordinates: latitude in [-90, 90], longitude in [-180, 180].
pub fn resolve_location(request: &ChartRequest) -> Result<GeoLocation> {
    let latitude = request
        .latitude
        .ok_or(ChartError::IncompleteLocation { field: "latitude" })?;
    let longitude = request
        .longitude
        .ok_or(ChartError::IncompleteLocation { field: "longitude" })?;
    Ok(GeoLocation {
        latitude: check_range("latitude", latitude, 90.0)?,
        longitude: check_range("longitude", longitude, 180.0)?,
    })
}

/// Attach sign, nakshatra and house to each sidereal position.
pub fn place_bodies(positions: &[BodyPosition], ascendant: f64) -> Vec<PlacedBody> {
    positions
        .iter()
        .map(|p| PlacedBody {
            position: *p,
            placement: zodiac::placement(p.sidereal_longitude),
            house: houses::house_of(p.sidereal_longitude, ascendant),
        })
        .collect()
}

fn in_arc(longitude: f64, start: f64) -> bool {
    let offset = normalize_angle(longitude - start);
    offset < SIGN_WIDTH + CUSP_TOLERANCE || offset > FULL_CIRCLE - CUSP_TOLERANCE
}

fn integrity(msg: String) -> Result<()> {
    Err(ChartError::ChartIntegrity(msg))
}

/// Check the structural invariants of an assembled chart.
pub fn validate(chart: &Chart) -> Result<()> {
    if chart.cusps.len() != HOUSE_COUNT as usize {
        return integrity(format!("expected 12 cusps, found {}", chart.cusps.len()));
    }
    for (i, cusp) in chart.cusps.iter().enumerate() {
        if cusp.house as usize != i + 1 {
            return integrity(format!("cusp {} is numbered {}", i + 1, cusp.house));
        }
        let next = &chart.cusps[(i + 1) % chart.cusps.len()];
        let gap = normalize_angle(next.longitude - cusp.longitude);
        if (gap - SIGN_WIDTH).abs() > CUSP_TOLERANCE {
            return integrity(format!("house {} spans {gap}°", cusp.house));
        }
    }

    let mut seen = HashSet::new();
    for placed in &chart.bodies {
        let body = placed.position.body;
        if !seen.insert(body) {
            return integrity(format!("{body} appears more than once"));
        }
        let Some(cusp) = chart.cusps.iter().find(|c| c.house == placed.house) else {
            return integrity(format!("{body} has no valid house ({})", placed.house));
        };
        if !in_arc(placed.position.sidereal_longitude, cusp.longitude) {
            return integrity(format!(
                "{body} at {:.6}° is not inside house {}",
                placed.position.sidereal_longitude, placed.house
            ));
        }
    }

    let mut pairs = HashSet::new();
    for aspect in &chart.aspects {
        if aspect.body_a == aspect.body_b {
            return integrity(format!("{} aspects itself", aspect.body_a));
        }
        if !seen.contains(&aspect.body_a) || !seen.contains(&aspect.body_b) {
            return integrity(format!(
                "aspect {}-{} references a body outside the chart",
                aspect.body_a, aspect.body_b
            ));
        }
        let key = (aspect.body_a.min(aspect.body_b), aspect.body_a.max(aspect.body_b));
        if !pairs.insert(key) {
            return integrity(format!(
                "duplicate aspect pair {}-{}",
                aspect.body_a, aspect.body_b
            ));
        }
    }
    Ok(())
}

/// Combine stage outputs into a [`Chart`] and verify it.
pub fn assemble(
    time: TimeContext,
    ayanamsa: f64,
    bodies: Vec<PlacedBody>,
    geometry: ChartGeometry,
    aspects: Vec<Aspect>,
) -> Result<Chart> {
    let chart = Chart {
        local_datetime: time.local,
        timezone: time.timezone,
        utc: time.utc,
        julian_day: time.julian_day,
        ayanamsa,
        ascendant: geometry.ascendant,
        tropical_ascendant: geometry.tropical_ascendant,
        midheaven: geometry.midheaven,
        bodies,
        cusps: geometry.cusps,
        aspects,
    };
    validate(&chart)?;
    Ok(chart)
}

pub fn compute_chart_with(request: &ChartRequest, config: &ChartConfig) -> Result<Chart> {
    config.validate()?;
    let location = resolve_location(request)?;
    let time = time::convert(&request.time, &location)?;
    log::debug!(
        "computing chart for {} ({}) at {:.4}, {:.4}: JD {:.6}",
        time.local,
        time.timezone,
        location.latitude,
        location.longitude,
        time.julian_day
    );

    let tropical = ephemeris::compute_all(&config.bodies, time.julian_day)?;
    let ayanamsa = ayanamsa::ayanamsa_value(&config.ayanamsa, time.julian_day);
    let sidereal = ayanamsa::apply(&tropical, ayanamsa);

    let geometry = houses::build_geometry(&time, location.latitude, ayanamsa);
    let placed = place_bodies(&sidereal, geometry.ascendant);
    let aspects = detect_aspects(&sidereal, &config.aspects);

    log::debug!(
        "ayanamsa {:.6}°, ascendant {:.4}°, {} aspects",
        ayanamsa,
        geometry.ascendant,
        aspects.len()
    );
    assemble(time, ayanamsa, placed, geometry, aspects)
}

pub fn compute_chart(request: &ChartRequest) -> Result<Chart> {
    compute_chart_with(request, &ChartConfig::default())
}
