//! Polyline representation for route geometries.
//!
//! Routes arrive from the directions API as Google encoded polylines: each
//! coordinate is stored as a signed delta from the previous one, at 1e-5
//! degree precision, split into 5-bit chunks offset into printable ASCII.
//! Decoding happens once at the API boundary; everything downstream works
//! with the decoded [`Polyline`].
//!
//! Ref: <https://developers.google.com/maps/documentation/utilities/polylinealgorithm>

use serde::{Deserialize, Serialize};

/// Fixed-point scale of encoded coordinates.
const PRECISION: f64 = 1e5;

/// Offset added to every chunk so it lands in the printable range.
const CHUNK_OFFSET: u8 = 63;

/// Set on every chunk except the last one of a value.
const CONTINUATION_BIT: i64 = 0x20;

const CHUNK_MASK: i64 = 0x1f;

/// A polyline representing a route geometry as decoded coordinates.
///
/// Points are `(latitude, longitude)` tuples in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string. See [`decode`].
    pub fn decode(encoded: &str) -> Self {
        Self::new(decode(encoded))
    }

    /// Encodes the points back into the compact string form.
    pub fn encode(&self) -> String {
        encode(&self.points)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    /// The point at `len / 2`, where a route's duration badge is anchored.
    pub fn midpoint(&self) -> Option<(f64, f64)> {
        self.points.get(self.points.len() / 2).copied()
    }
}

/// Decodes a Google encoded polyline into `(latitude, longitude)` points.
///
/// Never fails. Reads are bounded by the input length: a trailing coordinate
/// whose chunks are cut off by the end of the string is dropped rather than
/// emitted half-decoded.
pub fn decode(encoded: &str) -> Vec<(f64, f64)> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        let Some(dlat) = read_delta(bytes, &mut index) else {
            break;
        };
        let Some(dlng) = read_delta(bytes, &mut index) else {
            break;
        };

        lat = lat.wrapping_add(dlat);
        lng = lng.wrapping_add(dlng);
        points.push((lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    points
}

/// Encodes `(latitude, longitude)` points, rounding each to 1e-5 degrees.
///
/// Inputs must be finite. Values too large for the fixed-point form (far
/// outside valid degrees) saturate and do not round-trip.
pub fn encode(points: &[(f64, f64)]) -> String {
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for &(lat, lng) in points {
        debug_assert!(
            lat.is_finite() && lng.is_finite(),
            "cannot encode non-finite point ({}, {})",
            lat,
            lng
        );
        let lat = (lat * PRECISION).round() as i64;
        let lng = (lng * PRECISION).round() as i64;
        write_delta(lat.wrapping_sub(prev_lat), &mut encoded);
        write_delta(lng.wrapping_sub(prev_lng), &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

/// Reads one zig-zag encoded value starting at `index`.
///
/// Returns `None` if the input ends before a terminating chunk.
fn read_delta(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes.get(*index)?;
        *index += 1;

        let chunk = i64::from(byte.wrapping_sub(CHUNK_OFFSET));
        // Overlong runs only come from garbage input; ignore the excess bits.
        if shift < i64::BITS {
            result |= (chunk & CHUNK_MASK) << shift;
        }
        shift = shift.saturating_add(5);

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Some(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn write_delta(delta: i64, out: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;

    while value >= CONTINUATION_BIT as u64 {
        let chunk = (CONTINUATION_BIT as u64 | (value & CHUNK_MASK as u64)) as u8;
        out.push(char::from(chunk + CHUNK_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHUNK_OFFSET));
}
