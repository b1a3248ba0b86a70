//! Kochi routes used across the integration tests.
//!
//! Coordinates are rough traces of real roads from Ernakulam South to Aluva,
//! rounded to 1e-5 degrees so they survive an encode/decode round trip exactly.

#![allow(dead_code)]

use serde_json::{Value, json};

use ride_directions::polyline;
use ride_directions::polyline::Polyline;
use ride_directions::route::RouteOption;

pub const ERNAKULAM_SOUTH: (f64, f64) = (9.96886, 76.28985);
pub const ALUVA: (f64, f64) = (10.10764, 76.35158);

/// NH 544 via Edappally.
pub fn nh544() -> Vec<(f64, f64)> {
    vec![
        ERNAKULAM_SOUTH,
        (9.98145, 76.29372),
        (10.02478, 76.30828),
        (10.05137, 76.31582),
        (10.07542, 76.33057),
        ALUVA,
    ]
}

/// Seaport-Airport Road.
pub fn seaport_airport_road() -> Vec<(f64, f64)> {
    vec![
        ERNAKULAM_SOUTH,
        (9.97521, 76.31044),
        (10.01205, 76.34561),
        (10.05873, 76.35902),
        ALUVA,
    ]
}

/// Old Alwaye Road through Kalamassery.
pub fn old_alwaye_road() -> Vec<(f64, f64)> {
    vec![
        ERNAKULAM_SOUTH,
        (10.00012, 76.30214),
        (10.05521, 76.32098),
        ALUVA,
    ]
}

pub fn route_json(summary: &str, points: &[(f64, f64)], distance: &str, duration: &str) -> Value {
    json!({
        "summary": summary,
        "overview_polyline": { "points": polyline::encode(points) },
        "legs": [{
            "distance": { "text": distance, "value": 0 },
            "duration": { "text": duration, "value": 0 }
        }]
    })
}

/// A successful response with the three Kochi alternatives, fastest first.
pub fn ok_body() -> Value {
    json!({
        "status": "OK",
        "routes": [
            route_json("NH 544", &nh544(), "19.8 km", "38 mins"),
            route_json("Seaport - Airport Rd", &seaport_airport_road(), "22.1 km", "41 mins"),
            route_json("Old Alwaye Rd", &old_alwaye_road(), "18.9 km", "47 mins"),
        ]
    })
}

/// A successful response with `count` routes named "R1", "R2", ...
pub fn numbered_body(count: usize) -> Value {
    let routes: Vec<Value> = (1..=count)
        .map(|i| route_json(&format!("R{}", i), &nh544(), "19.8 km", "38 mins"))
        .collect();
    json!({ "status": "OK", "routes": routes })
}

pub fn option(summary: &str, points: Vec<(f64, f64)>) -> RouteOption {
    RouteOption::new(summary, "20 km", "40 mins", Polyline::new(points))
        .expect("fixture routes are non-empty")
}

pub fn kochi_options() -> Vec<RouteOption> {
    vec![
        option("NH 544", nh544()),
        option("Seaport - Airport Rd", seaport_airport_road()),
        option("Old Alwaye Rd", old_alwaye_road()),
    ]
}
