//! Map-fit geometry for the active route.
//!
//! The rendering layer fits its camera to a bounding box; this module only
//! computes the box and the padding to keep clear of overlaid UI.

use serde::Serialize;

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// (latitude, longitude) of the south-west corner.
    pub south_west: (f64, f64),
    /// (latitude, longitude) of the north-east corner.
    pub north_east: (f64, f64),
}

impl Bounds {
    /// Smallest box containing every point. `None` for an empty slice.
    ///
    /// Does not handle routes crossing the antimeridian.
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut bounds = Bounds {
            south_west: first,
            north_east: first,
        };

        for &(lat, lng) in rest {
            bounds.south_west.0 = bounds.south_west.0.min(lat);
            bounds.south_west.1 = bounds.south_west.1.min(lng);
            bounds.north_east.0 = bounds.north_east.0.max(lat);
            bounds.north_east.1 = bounds.north_east.1.max(lng);
        }

        Some(bounds)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.south_west.0 + self.north_east.0) / 2.0,
            (self.south_west.1 + self.north_east.1) / 2.0,
        )
    }

    pub fn contains(&self, (lat, lng): (f64, f64)) -> bool {
        lat >= self.south_west.0
            && lat <= self.north_east.0
            && lng >= self.south_west.1
            && lng <= self.north_east.1
    }
}

/// Screen-space padding in pixels around a fitted box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgePadding {
    pub top: u32,
    pub right: u32,
    /// Leaves room for the bottom sheet.
    pub bottom: u32,
    pub left: u32,
}

impl Default for EdgePadding {
    fn default() -> Self {
        Self {
            top: 80,
            right: 60,
            bottom: 320,
            left: 60,
        }
    }
}

/// What the map should fit to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapFit {
    pub bounds: Bounds,
    pub padding: EdgePadding,
}
