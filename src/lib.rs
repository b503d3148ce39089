pub mod angles;
pub mod aspects;
pub mod ayanamsa;
pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod time;
pub mod types;
pub mod zodiac;

pub use angles::{
    angular_separation, deg_to_dms, deg_to_rad, dms_to_deg, normalize_angle, rad_to_deg,
    signed_delta,
};

pub use aspects::{classify, detect_aspects, is_applying, strength};

pub use ayanamsa::{ayanamsa_value, to_sidereal};

pub use chart::{assemble, compute_chart, compute_chart_with, resolve_location, validate, Chart};

pub use config::{AspectRule, AyanamsaConfig, ChartConfig, PeriodicTerm};

pub use ephemeris::{compute_all, compute_body, mean_daily_motion};

pub use error::{ChartError, Result};

pub use houses::{equal_house_cusps, house_of, midheaven, tropical_ascendant};

pub use time::{
    julian_centuries, julian_day, julian_day_from_utc, local_sidereal_time, mean_obliquity,
    resolve_timezone, to_utc, J2000_JD,
};

pub use types::{
    Aspect, AspectKind, Body, BodyPosition, ChartGeometry, ChartRequest, CivilTime, Dms,
    GeoLocation, HouseCusp, PlacedBody, Sign, TimeContext, ZodiacPlacement,
};

pub use zodiac::{nakshatra_index, pada, placement, sign_index, sign_of};
