use chrono::NaiveDate;

use sidereal_chart::angles::deg_to_dms;
use sidereal_chart::chart::compute_chart_with;
use sidereal_chart::config::ChartConfig;
use sidereal_chart::types::{ChartRequest, CivilTime};
use sidereal_chart::zodiac::degree_in_sign;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let latitude = 28.6139;
    let longitude = 77.2090;
    let local = NaiveDate::from_ymd_opt(1990, 5, 15)
        .and_then(|d| d.and_hms_opt(10, 15, 0))
        .ok_or("invalid date")?;

    // Optional TOML config path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };

    let request = ChartRequest::new(CivilTime::zoned(local, "Asia/Kolkata"), latitude, longitude);
    let chart = compute_chart_with(&request, &config)?;

    println!("=== Sidereal Chart Example ===");
    println!(
        "Location: New Delhi ({:.4}°N, {:.4}°E)",
        latitude, longitude
    );
    println!("Local time: {} ({})", chart.local_datetime(), chart.timezone());
    println!("UTC: {}", chart.utc());
    println!("Julian Day: {:.6}", chart.julian_day());
    println!("Ayanamsa: {}", deg_to_dms(chart.ayanamsa()));
    println!();
    println!("--- Angles ---");
    println!(
        "Ascendant: {:.2}° ({})",
        chart.ascendant(),
        chart.cusps()[0].sign
    );
    println!("Midheaven: {:.2}°", chart.midheaven());
    println!();
    println!("--- Bodies ---");
    for placed in chart.bodies() {
        let p = &placed.position;
        let z = &placed.placement;
        println!(
            "{:<8} {:>8} {:<12} {:<10} {:<18} pada {} house {:>2}{}",
            p.body.name(),
            deg_to_dms(degree_in_sign(p.sidereal_longitude)).to_string(),
            z.sign.name(),
            z.sign_sanskrit,
            z.nakshatra_name,
            z.pada,
            placed.house,
            if p.retrograde { "  (R)" } else { "" }
        );
    }
    println!();
    println!("--- Aspects ---");
    for a in chart.aspects() {
        println!(
            "{} {} {}: orb {:.2}° strength {}{}",
            a.body_a,
            a.kind,
            a.body_b,
            a.orb,
            a.strength,
            if a.applying { " applying" } else { "" }
        );
    }
    println!();
    println!("--- JSON ---");
    println!("{}", chart.to_json()?);
    Ok(())
}
