use std::f64::consts::TAU;

use crate::angles::normalize_angle;
use crate::config::AyanamsaConfig;
use crate::time::{days_since_j2000, DAYS_PER_JULIAN_YEAR};
use crate::types::BodyPosition;

/// Ayanamsa in degrees at Julian Day `jd`.
///
/// Linear precession from the J2000.0 reference value plus the configured
/// periodic terms, each a sine of years since the epoch.
pub fn ayanamsa_value(config: &AyanamsaConfig, jd: f64) -> f64 {
    let years = days_since_j2000(jd) / DAYS_PER_JULIAN_YEAR;
    let linear = config.base_offset + config.precession_arcsec_per_year / 3600.0 * years;
    let periodic: f64 = config
        .periodic_terms
        .iter()
        .map(|term| term.amplitude * (TAU * years / term.period_years).sin())
        .sum();
    linear + periodic
}

pub fn to_sidereal(tropical_longitude: f64, ayanamsa: f64) -> f64 {
    normalize_angle(tropical_longitude - ayanamsa)
}

/// Shift every body by the same ayanamsa value.
pub fn apply(positions: &[BodyPosition], ayanamsa: f64) -> Vec<BodyPosition> {
    positions
        .iter()
        .map(|p| BodyPosition {
            sidereal_longitude: to_sidereal(p.tropical_longitude, ayanamsa),
            ..*p
        })
        .collect()
}
