use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::types::{AspectKind, Body};

/// Largest amplitude, in degrees, a periodic ayanamsa term may carry.
pub const MAX_PERIODIC_AMPLITUDE: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRule {
    pub kind: AspectKind,
    pub angle: f64,
    pub max_orb: f64,
    pub base_strength: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicTerm {
    pub amplitude: f64,
    pub period_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AyanamsaConfig {
    /// Ayanamsa at J2000.0, degrees.
    pub base_offset: f64,
    pub precession_arcsec_per_year: f64,
    pub periodic_terms: Vec<PeriodicTerm>,
}

impl Default for AyanamsaConfig {
    fn default() -> Self {
        Self {
            base_offset: 23.853,
            precession_arcsec_per_year: 50.238_847_5,
            periodic_terms: vec![
                PeriodicTerm {
                    amplitude: 0.001_7,
                    period_years: 18.6,
                },
                PeriodicTerm {
                    amplitude: 0.000_2,
                    period_years: 0.5,
                },
            ],
        }
    }
}

pub fn default_aspect_rules() -> Vec<AspectRule> {
    vec![
        AspectRule {
            kind: AspectKind::Conjunction,
            angle: 0.0,
            max_orb: 8.0,
            base_strength: 10,
        },
        AspectRule {
            kind: AspectKind::Sextile,
            angle: 60.0,
            max_orb: 6.0,
            base_strength: 6,
        },
        AspectRule {
            kind: AspectKind::Square,
            angle: 90.0,
            max_orb: 8.0,
            base_strength: 8,
        },
        AspectRule {
            kind: AspectKind::Trine,
            angle: 120.0,
            max_orb: 8.0,
            base_strength: 7,
        },
        AspectRule {
            kind: AspectKind::Opposition,
            angle: 180.0,
            max_orb: 8.0,
            base_strength: 9,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub bodies: Vec<Body>,
    pub aspects: Vec<AspectRule>,
    pub ayanamsa: AyanamsaConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bodies: Body::ALL.to_vec(),
            aspects: default_aspect_rules(),
            ayanamsa: AyanamsaConfig::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ChartConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("loaded chart config from {}", path.as_ref().display());
        Self::from_toml_str(&text)
    }

    pub fn rule(&self, kind: AspectKind) -> Option<&AspectRule> {
        self.aspects.iter().find(|r| r.kind == kind)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bodies.is_empty() {
            return Err(ChartError::InvalidConfig("body list is empty".into()));
        }
        let mut seen_bodies = HashSet::new();
        for body in &self.bodies {
            if !seen_bodies.insert(*body) {
                return Err(ChartError::InvalidConfig(format!("{body} listed twice")));
            }
        }

        let mut seen_kinds = HashSet::new();
        for rule in &self.aspects {
            if !seen_kinds.insert(rule.kind) {
                return Err(ChartError::InvalidConfig(format!(
                    "aspect {} defined twice",
                    rule.kind
                )));
            }
            if !rule.max_orb.is_finite() || rule.max_orb < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "aspect {} has invalid orb {}",
                    rule.kind, rule.max_orb
                )));
            }
            if !(0.0..=180.0).contains(&rule.angle) {
                return Err(ChartError::InvalidConfig(format!(
                    "aspect {} has invalid angle {}",
                    rule.kind, rule.angle
                )));
            }
            if !(1..=10).contains(&rule.base_strength) {
                return Err(ChartError::InvalidConfig(format!(
                    "aspect {} base strength {} outside 1..=10",
                    rule.kind, rule.base_strength
                )));
            }
        }

        let ay = &self.ayanamsa;
        if !ay.base_offset.is_finite() || !ay.precession_arcsec_per_year.is_finite() {
            return Err(ChartError::InvalidConfig("ayanamsa coefficients must be finite".into()));
        }
        for term in &ay.periodic_terms {
            if !(term.amplitude.abs() <= MAX_PERIODIC_AMPLITUDE) {
                return Err(ChartError::InvalidConfig(format!(
                    "periodic ayanamsa amplitude {} exceeds {MAX_PERIODIC_AMPLITUDE}°",
                    term.amplitude
                )));
            }
            if !(term.period_years.is_finite() && term.period_years > 0.0) {
                return Err(ChartError::InvalidConfig(format!(
                    "periodic ayanamsa period {} must be positive",
                    term.period_years
                )));
            }
        }
        Ok(())
    }
}
