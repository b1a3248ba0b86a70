//! Route options returned by the directions fetcher.

use std::fmt;

use serde::Serialize;

use crate::polyline::Polyline;

/// Where a trip starts: a place the service geocodes, or a device fix.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Place(String),
    /// (latitude, longitude)
    Coordinates(f64, f64),
}

impl Origin {
    /// Treats `"lat,lng"` as coordinates and anything else as a place name.
    pub fn parse(value: &str) -> Self {
        match parse_lat_lng(value) {
            Some((lat, lng)) => Origin::Coordinates(lat, lng),
            None => Origin::Place(value.to_string()),
        }
    }

    /// Value for the `origin` query parameter.
    pub fn to_param(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Place(place) => f.write_str(place),
            Origin::Coordinates(lat, lng) => write!(f, "{},{}", lat, lng),
        }
    }
}

impl From<&str> for Origin {
    fn from(place: &str) -> Self {
        Origin::Place(place.to_string())
    }
}

impl From<String> for Origin {
    fn from(place: String) -> Self {
        Origin::Place(place)
    }
}

impl From<(f64, f64)> for Origin {
    fn from((lat, lng): (f64, f64)) -> Self {
        Origin::Coordinates(lat, lng)
    }
}

/// One candidate path between an origin and a destination.
///
/// The geometry is never empty; [`RouteOption::new`] refuses empty polylines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOption {
    summary: String,
    distance_text: String,
    duration_text: String,
    polyline: Polyline,
}

impl RouteOption {
    /// Returns `None` when `polyline` has no points.
    pub fn new(
        summary: impl Into<String>,
        distance_text: impl Into<String>,
        duration_text: impl Into<String>,
        polyline: Polyline,
    ) -> Option<Self> {
        if polyline.is_empty() {
            return None;
        }

        Some(Self {
            summary: summary.into(),
            distance_text: distance_text.into(),
            duration_text: duration_text.into(),
            polyline,
        })
    }

    /// Road label, e.g. "I-80 W". May be empty.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn distance_text(&self) -> &str {
        &self.distance_text
    }

    pub fn duration_text(&self) -> &str {
        &self.duration_text
    }

    pub fn polyline(&self) -> &Polyline {
        &self.polyline
    }

    pub fn coordinates(&self) -> &[(f64, f64)] {
        self.polyline.points()
    }

    pub fn start(&self) -> (f64, f64) {
        self.polyline.points()[0]
    }

    pub fn end(&self) -> (f64, f64) {
        self.polyline.points()[self.polyline.len() - 1]
    }
}

/// Parses `"lat,lng"`. Both parts must be finite numbers.
pub fn parse_lat_lng(value: &str) -> Option<(f64, f64)> {
    let (lat, lng) = value.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    (lat.is_finite() && lng.is_finite()).then_some((lat, lng))
}

/// Display label for the route at `index` in a fetched set.
///
/// The service orders alternatives best-first, so the first one is the fastest.
pub fn route_label(index: usize) -> String {
    if index == 0 {
        "Fastest Route".to_string()
    } else {
        format!("Route {}", index + 1)
    }
}
