use chrono::{DateTime, Datelike, LocalResult, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::angles::normalize_angle;
use crate::error::{ChartError, Result};
use crate::types::{CivilTime, GeoLocation, TimeContext};

pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

const GMST_AT_J2000: f64 = 280.460_618_37;
const GMST_RATE_PER_DAY: f64 = 360.985_647_366_29;
const GMST_T2: f64 = 0.000_387_933;
const GMST_T3_DIVISOR: f64 = 38_710_000.0;

const OBLIQUITY_AT_J2000: f64 = 23.439_291;
const OBLIQUITY_RATE_PER_CENTURY: f64 = -0.013_004_2;

pub fn resolve_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse::<Tz>()
        .map_err(|_| ChartError::InvalidTimezone {
            timezone: timezone.to_string(),
        })
}

/// Convert a civil time to UTC, returning the wall-clock time and the zone
/// label alongside the instant.
///
/// A local time that falls in a DST fold resolves to the earlier instant; one
/// that falls in a DST gap is rejected.
pub fn to_utc(time: &CivilTime) -> Result<(NaiveDateTime, String, DateTime<Utc>)> {
    match time {
        CivilTime::Offset(dt) => Ok((
            dt.naive_local(),
            dt.offset().to_string(),
            dt.with_timezone(&Utc),
        )),
        CivilTime::Zoned { local, timezone } => {
            let tz = resolve_timezone(timezone)?;
            let zoned = match tz.from_local_datetime(local) {
                LocalResult::Single(dt) => dt,
                LocalResult::Ambiguous(earliest, latest) => {
                    log::warn!(
                        "{} is ambiguous in {}: using {} rather than {}",
                        local,
                        timezone,
                        earliest,
                        latest
                    );
                    earliest
                }
                LocalResult::None => {
                    return Err(ChartError::NonexistentLocalTime {
                        local: *local,
                        timezone: timezone.clone(),
                    })
                }
            };
            Ok((*local, tz.name().to_string(), zoned.with_timezone(&Utc)))
        }
    }
}

/// Julian Day for a Gregorian calendar date, `hour` being fractional UT hours.
pub fn julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + hour / 24.0 + b
        - 1524.5
}

pub fn julian_day_from_utc(utc: &DateTime<Utc>) -> f64 {
    let hour = utc.hour() as f64
        + utc.minute() as f64 / 60.0
        + utc.second() as f64 / 3600.0
        + utc.nanosecond() as f64 / 3.6e12;
    julian_day(utc.year(), utc.month(), utc.day(), hour)
}

pub fn days_since_j2000(jd: f64) -> f64 {
    jd - J2000_JD
}

pub fn julian_centuries(jd: f64) -> f64 {
    days_since_j2000(jd) / DAYS_PER_JULIAN_CENTURY
}

/// Greenwich mean sidereal time in degrees, [0, 360).
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let d = days_since_j2000(jd);
    let t = julian_centuries(jd);
    normalize_angle(
        GMST_AT_J2000 + GMST_RATE_PER_DAY * d + GMST_T2 * t * t - t * t * t / GMST_T3_DIVISOR,
    )
}

/// Local sidereal time in degrees for an east-positive geographic longitude.
pub fn local_sidereal_time(jd: f64, longitude: f64) -> f64 {
    normalize_angle(greenwich_sidereal_time(jd) + longitude)
}

/// Mean obliquity of the ecliptic in degrees, linear in T.
pub fn mean_obliquity(julian_centuries: f64) -> f64 {
    OBLIQUITY_AT_J2000 + OBLIQUITY_RATE_PER_CENTURY * julian_centuries
}

pub fn convert(time: &CivilTime, location: &GeoLocation) -> Result<TimeContext> {
    let (local, timezone, utc) = to_utc(time)?;
    let jd = julian_day_from_utc(&utc);
    let t = julian_centuries(jd);
    Ok(TimeContext {
        local,
        timezone,
        utc,
        julian_day: jd,
        julian_centuries: t,
        local_sidereal_time: local_sidereal_time(jd, location.longitude),
        obliquity: mean_obliquity(t),
    })
}
