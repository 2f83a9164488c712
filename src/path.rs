//! Turns journey legs into drawable coordinate sequences and gathers the
//! points a viewport has to fit.

use crate::model::{LatLng, Leg, Location, Station};

/// `[from, ...intermediate_stops, to]`, or `None` when either endpoint is
/// missing and the leg cannot be drawn.
pub fn build_leg_path(leg: &Leg) -> Option<Vec<LatLng>> {
    let (from, to) = (leg.from_coords?, leg.to_coords?);
    let stops = leg.intermediate();

    let mut points = Vec::with_capacity(stops.len() + 2);
    points.push(from);
    points.extend_from_slice(stops);
    points.push(to);
    Some(points)
}

/// Straight two-point approximation for a journey that has no legs.
pub fn fallback_path(origin: LatLng, station: LatLng) -> Vec<LatLng> {
    vec![origin, station]
}

/// Every point the map must show for `station`: the station itself, each
/// origin with known coordinates, and every leg endpoint and intermediate
/// stop of the station's journeys.
pub fn collect_bounds_inputs(station: &Station, origins: &[Location]) -> Vec<LatLng> {
    let mut points = vec![station.coords()];
    points.extend(origins.iter().filter_map(Location::coords));

    for leg in station.journey_times.iter().flat_map(|j| &j.legs) {
        points.extend(leg.from_coords);
        points.extend_from_slice(leg.intermediate());
        points.extend(leg.to_coords);
    }

    points
}

/// Axis-aligned box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut b = Bounds {
            south_west: *first,
            north_east: *first,
        };
        for p in rest {
            b.south_west.lat = b.south_west.lat.min(p.lat);
            b.south_west.lon = b.south_west.lon.min(p.lon);
            b.north_east.lat = b.north_east.lat.max(p.lat);
            b.north_east.lon = b.north_east.lon.max(p.lon);
        }
        Some(b)
    }

    /// Grows the box by `ratio` of its span on every side.
    pub fn padded(self, ratio: f64) -> Self {
        let dlat = (self.north_east.lat - self.south_west.lat) * ratio;
        let dlon = (self.north_east.lon - self.south_west.lon) * ratio;
        Bounds {
            south_west: LatLng::new(self.south_west.lat - dlat, self.south_west.lon - dlon),
            north_east: LatLng::new(self.north_east.lat + dlat, self.north_east.lon + dlon),
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lon + self.north_east.lon) / 2.0,
        )
    }

    pub fn contains(&self, p: LatLng) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&p.lat)
            && (self.south_west.lon..=self.north_east.lon).contains(&p.lon)
    }
}
