//! Low-order geocentric ephemeris.
//!
//! The Sun and Moon use a mean longitude advancing linearly in Julian
//! centuries since J2000.0, corrected by two sine terms of their own mean
//! anomaly. The five planets are placed on Keplerian heliocentric orbits
//! (mean elements of date) and seen from the Earth's orbit, which keeps
//! Mercury and Venus within their maximum elongations. Latitude and distance
//! come from fixed per-body tables; latitude is modulated by a yearly
//! sinusoid scaled to the body's maximum ecliptic latitude. Longitudes are
//! good to about a degree over several centuries around J2000.0.

use std::f64::consts::TAU;

use crate::angles::{deg_to_rad, normalize_angle, rad_to_deg};
use crate::error::{ChartError, Result};
use crate::time::{days_since_j2000, julian_centuries, DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_YEAR};
use crate::types::{Body, BodyPosition};

const KEPLER_ITERATIONS: usize = 8;

/// Geocentric mean-element row. Angles in degrees, rates per Julian century.
#[derive(Debug, Clone, Copy)]
struct MeanElements {
    base_longitude: f64,
    longitude_rate: f64,
    base_anomaly: f64,
    anomaly_rate: f64,
    /// Amplitudes of `sin(M)` and `sin(2M)`.
    perturbation: [f64; 2],
    max_latitude: f64,
    mean_distance_au: f64,
}

/// Heliocentric orbit referred to the ecliptic and equinox of date.
#[derive(Debug, Clone, Copy)]
struct Orbit {
    mean_longitude: f64,
    longitude_rate: f64,
    perihelion: f64,
    perihelion_rate: f64,
    eccentricity: f64,
    semi_major_axis: f64,
}

#[derive(Debug, Clone, Copy)]
struct Planet {
    orbit: Orbit,
    /// Inside the Earth's orbit: mean geocentric motion follows the Sun.
    inferior: bool,
    max_latitude: f64,
    /// Time-averaged distance from the Earth.
    mean_distance_au: f64,
}

enum Model {
    Mean(&'static MeanElements),
    Orbit(&'static Planet),
}

const SUN: MeanElements = MeanElements {
    base_longitude: 280.466_46,
    longitude_rate: 36_000.769_83,
    base_anomaly: 357.529_11,
    anomaly_rate: 35_999.050_29,
    perturbation: [1.914_602, 0.019_993],
    max_latitude: 0.0,
    mean_distance_au: 1.0,
};

const MOON: MeanElements = MeanElements {
    base_longitude: 218.316_447_7,
    longitude_rate: 481_267.881_234_21,
    base_anomaly: 134.963_396_4,
    anomaly_rate: 477_198.867_505_5,
    perturbation: [6.289, 0.214],
    max_latitude: 5.145,
    mean_distance_au: 0.002_57,
};

// Mean node regresses; no periodic terms.
const RAHU: MeanElements = MeanElements {
    base_longitude: 125.044_547_9,
    longitude_rate: -1_934.136_289_1,
    base_anomaly: 0.0,
    anomaly_rate: 0.0,
    perturbation: [0.0, 0.0],
    max_latitude: 0.0,
    mean_distance_au: 0.002_57,
};

const EARTH: Orbit = Orbit {
    mean_longitude: 100.466_449,
    longitude_rate: 36_000.769_823_1,
    perihelion: 102.937_348,
    perihelion_rate: 1.719_526_9,
    eccentricity: 0.016_709,
    semi_major_axis: 1.000_001_018,
};

const MERCURY: Planet = Planet {
    orbit: Orbit {
        mean_longitude: 252.250_906,
        longitude_rate: 149_474.072_249_1,
        perihelion: 77.456_119,
        perihelion_rate: 1.556_477_5,
        eccentricity: 0.205_631_75,
        semi_major_axis: 0.387_098_310,
    },
    inferior: true,
    max_latitude: 7.005,
    mean_distance_au: 1.038,
};

const VENUS: Planet = Planet {
    orbit: Orbit {
        mean_longitude: 181.979_801,
        longitude_rate: 58_519.213_030_2,
        perihelion: 131.563_707,
        perihelion_rate: 1.402_218_8,
        eccentricity: 0.006_771_88,
        semi_major_axis: 0.723_329_820,
    },
    inferior: true,
    max_latitude: 3.395,
    mean_distance_au: 1.136,
};

const MARS: Planet = Planet {
    orbit: Orbit {
        mean_longitude: 355.433_275,
        longitude_rate: 19_141.696_474_6,
        perihelion: 336.060_234,
        perihelion_rate: 1.841_033_1,
        eccentricity: 0.093_400_62,
        semi_major_axis: 1.523_679_342,
    },
    inferior: false,
    max_latitude: 1.850,
    mean_distance_au: 1.701,
};

const JUPITER: Planet = Planet {
    orbit: Orbit {
        mean_longitude: 34.351_484,
        longitude_rate: 3_036.302_788_9,
        perihelion: 14.331_309,
        perihelion_rate: 1.612_666_8,
        eccentricity: 0.048_494_85,
        semi_major_axis: 5.202_603_191,
    },
    inferior: false,
    max_latitude: 1.303,
    mean_distance_au: 5.269,
};

const SATURN: Planet = Planet {
    orbit: Orbit {
        mean_longitude: 50.077_471,
        longitude_rate: 1_223.511_014_1,
        perihelion: 93.056_787,
        perihelion_rate: 1.963_769_4,
        eccentricity: 0.055_508_62,
        semi_major_axis: 9.554_909_596,
    },
    inferior: false,
    max_latitude: 2.489,
    mean_distance_au: 9.524,
};

fn model(body: Body) -> Model {
    match body {
        Body::Sun => Model::Mean(&SUN),
        Body::Moon => Model::Mean(&MOON),
        Body::Mercury => Model::Orbit(&MERCURY),
        Body::Venus => Model::Orbit(&VENUS),
        Body::Mars => Model::Orbit(&MARS),
        Body::Jupiter => Model::Orbit(&JUPITER),
        Body::Saturn => Model::Orbit(&SATURN),
        Body::Rahu | Body::Ketu => Model::Mean(&RAHU),
    }
}

/// Nominal geocentric mean motion in degrees per day. Negative for the nodes.
pub fn mean_daily_motion(body: Body) -> f64 {
    let rate = match model(body) {
        Model::Mean(el) => el.longitude_rate,
        Model::Orbit(p) if p.inferior => SUN.longitude_rate,
        Model::Orbit(p) => p.orbit.longitude_rate,
    };
    rate / DAYS_PER_JULIAN_CENTURY
}

pub fn max_ecliptic_latitude(body: Body) -> f64 {
    match model(body) {
        Model::Mean(el) => el.max_latitude,
        Model::Orbit(p) => p.max_latitude,
    }
}

pub fn mean_distance(body: Body) -> f64 {
    match model(body) {
        Model::Mean(el) => el.mean_distance_au,
        Model::Orbit(p) => p.mean_distance_au,
    }
}

fn mean_longitude(el: &MeanElements, t: f64) -> f64 {
    let mean = normalize_angle(el.base_longitude + el.longitude_rate * t);
    let anomaly = deg_to_rad(el.base_anomaly + el.anomaly_rate * t);
    let correction = el.perturbation[0] * anomaly.sin() + el.perturbation[1] * (2.0 * anomaly).sin();
    normalize_angle(mean + correction)
}

/// Heliocentric ecliptic (x, y) in AU, ignoring orbital inclination.
fn heliocentric(orbit: &Orbit, t: f64) -> (f64, f64) {
    let perihelion = orbit.perihelion + orbit.perihelion_rate * t;
    let mean_anomaly = deg_to_rad(orbit.mean_longitude + orbit.longitude_rate * t - perihelion)
        .rem_euclid(TAU);
    let e = orbit.eccentricity;

    let mut eccentric = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        eccentric -= (eccentric - e * eccentric.sin() - mean_anomaly) / (1.0 - e * eccentric.cos());
    }
    let true_anomaly = 2.0
        * ((1.0 + e).sqrt() * (eccentric / 2.0).sin())
            .atan2((1.0 - e).sqrt() * (eccentric / 2.0).cos());
    let radius = orbit.semi_major_axis * (1.0 - e * eccentric.cos());
    let longitude = deg_to_rad(perihelion) + true_anomaly;
    (radius * longitude.cos(), radius * longitude.sin())
}

fn geocentric_longitude(planet: &Planet, t: f64) -> f64 {
    let (px, py) = heliocentric(&planet.orbit, t);
    let (ex, ey) = heliocentric(&EARTH, t);
    normalize_angle(rad_to_deg((py - ey).atan2(px - ex)))
}

fn tropical_longitude(body: Body, t: f64) -> f64 {
    match model(body) {
        Model::Mean(el) if body == Body::Ketu => normalize_angle(mean_longitude(el, t) + 180.0),
        Model::Mean(el) => mean_longitude(el, t),
        Model::Orbit(planet) => geocentric_longitude(planet, t),
    }
}

fn ecliptic_latitude(body: Body, days: f64) -> f64 {
    let phase = TAU * days / DAYS_PER_JULIAN_YEAR;
    max_ecliptic_latitude(body) * phase.sin()
}

/// Tropical position of `body` at Julian Day `jd`.
///
/// The sidereal longitude is left equal to the tropical one until the
/// ayanamsa stage shifts it. A non-finite intermediate is reported as
/// [`ChartError::BodyComputation`].
pub fn compute_body(body: Body, jd: f64) -> Result<BodyPosition> {
    let t = julian_centuries(jd);
    let longitude = tropical_longitude(body, t);
    let latitude = ecliptic_latitude(body, days_since_j2000(jd));
    let speed = mean_daily_motion(body);
    let distance_au = mean_distance(body);

    if ![longitude, latitude, speed, distance_au].iter().all(|v| v.is_finite()) {
        return Err(ChartError::BodyComputation { body });
    }
    log::trace!("{body}: tropical {longitude:.4}° lat {latitude:.4}° speed {speed:.4}°/d");

    Ok(BodyPosition {
        body,
        tropical_longitude: longitude,
        sidereal_longitude: longitude,
        latitude,
        distance_au,
        speed,
        retrograde: speed < 0.0,
    })
}

pub fn compute_all(bodies: &[Body], jd: f64) -> Result<Vec<BodyPosition>> {
    bodies.iter().map(|&body| compute_body(body, jd)).collect()
}
