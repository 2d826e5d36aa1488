//! xsmall: smallest example for the way-matching workspace.
//!
//! Loads a six-way synthetic street grid, indexes it, and matches a short
//! synthetic bicycle track against it.  Each observation carries a position
//! and a travel bearing; the output lists the matched street, the lateral
//! distance, and whether the rider went with or against the street's
//! direction.
//!
//! Set `RUST_LOG=debug` (or `trace`) to see index and candidate diagnostics.

mod network;

use std::f64::consts::{FRAC_PI_2, PI};
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wm_core::{GeoPoint, MatchConfig};
use wm_spatial::{Observation, WayContainer, WayMatcher};

use network::build_ways;

// ── Configuration ─────────────────────────────────────────────────────────────

// As an application would read it from disk.
const CONFIG_JSON: &str = r#"{
    "search_radius_m": 25.0,
    "max_direction_deviation": null,
    "num_threads": 2
}"#;

/// Offset used for the kerb line printed at the end, metres.
const KERB_OFFSET_M: f64 = 4.0;

// ── Track ─────────────────────────────────────────────────────────────────────

/// A rider heading east along the southern street, turning north into the
/// one-way Mittelgasse (its legal direction, as `oneway=-1` reverses the
/// south-bound node order), then west along the northern street (against its
/// one-way direction), plus one lost GPS fix.
fn synthetic_track() -> Vec<Observation> {
    vec![
        Observation::new(GeoPoint::new(48.77598, 9.17650), 0.0),
        Observation::new(GeoPoint::new(48.77603, 9.17750), 0.02),
        Observation::new(GeoPoint::new(48.77599, 9.17850), -0.05),
        Observation::new(GeoPoint::new(48.77650, 9.17905), FRAC_PI_2),
        Observation::new(GeoPoint::new(48.77720, 9.17897), FRAC_PI_2 + 0.1),
        Observation::new(GeoPoint::new(f64::NAN, f64::NAN), 0.0),
        Observation::new(GeoPoint::new(48.77802, 9.17820), PI),
        Observation::new(GeoPoint::new(48.77797, 9.17700), PI - 0.03),
        Observation::new(GeoPoint::new(48.77900, 9.17700), PI),
    ]
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== xsmall: way matching ===");
    println!();

    // 1. Configuration.
    let config: MatchConfig = serde_json::from_str(CONFIG_JSON)?;
    config.validate()?;

    // 2. Ways and index.
    let ways = build_ways()?;
    let container = WayContainer::bulk_load(ways, config.search_radius_m);
    info!(ways = container.len(), "index ready");
    println!("Indexed {} ways", container.len());

    // 3. Match the track.
    let matcher = WayMatcher::new(&container, config)?;
    let track = synthetic_track();

    let t0 = Instant::now();
    let matches = matcher.match_batch(&track);
    let elapsed = t0.elapsed();

    println!("Matched {} observations in {:.3} ms", track.len(), elapsed.as_secs_f64() * 1e3);
    println!();

    // 4. Results table.
    println!(
        "{:<4} {:<24} {:<14} {:>8} {:>10} {:>6}",
        "#", "Observation", "Street", "Dist m", "Dev deg", "Sign"
    );
    println!("{}", "-".repeat(72));
    for (i, (obs, m)) in track.iter().zip(&matches).enumerate() {
        match m {
            Some(m) => {
                let name = container
                    .get(m.way_id)
                    .and_then(|w| w.tags().get("name").cloned())
                    .unwrap_or_else(|| m.way_id.to_string());
                println!(
                    "{:<4} {:<24} {:<14} {:>8.2} {:>10.1} {:>+6}",
                    i,
                    obs.point.to_string(),
                    name,
                    m.distance_m,
                    m.direction_deviation.to_degrees(),
                    m.orientation.sign(),
                );
            }
            None => println!("{:<4} {:<24} {:<14}", i, obs.point.to_string(), "(no match)"),
        }
    }
    println!();

    // 5. Full record of the first match, as downstream stages consume it.
    if let Some(Some(first)) = matches.first() {
        println!("First match as JSON:");
        println!("{}", serde_json::to_string_pretty(first)?);
        println!();

        if let Some(way) = container.get(first.way_id) {
            println!("Kerb line {KERB_OFFSET_M} m left of {}:", way.id());
            for p in way.coordinates(false, KERB_OFFSET_M) {
                println!("  {p}");
            }
        }
    }

    Ok(())
}
