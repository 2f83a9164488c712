//! Projection of `(result, selection)` into drawable map data.

use serde::Serialize;
use tracing::{debug, warn};

use crate::display::clamped_display_set;
use crate::model::{LatLng, MeetingPointResult};
use crate::path::{Bounds, build_leg_path, collect_bounds_inputs, fallback_path};
use crate::selection::Selection;
use crate::style::{
    Color, DIM_FACTOR, FALLBACK_DIM_FACTOR, FALLBACK_STYLE, LineStyle, person_color,
    resolve_color, resolve_line_style,
};

/// Share of the bounding box added on each side when fitting the viewport.
pub const VIEWPORT_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Routed,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub person_index: usize,
    /// `None` for fallback segments.
    pub leg_index: Option<usize>,
    pub kind: SegmentKind,
    pub mode: Option<String>,
    pub points: Vec<LatLng>,
    pub color: Color,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    Origin {
        person_index: usize,
        name: String,
        initials: String,
        color: Color,
        position: LatLng,
        journey_minutes: Option<u32>,
        estimated: bool,
    },
    Station {
        name: String,
        position: LatLng,
        optimal: bool,
        average_minutes: f64,
        max_minutes: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub station_index: usize,
    pub segments: Vec<PathSegment>,
    pub markers: Vec<Marker>,
    pub bounds_inputs: Vec<LatLng>,
    pub viewport: Option<Bounds>,
}

impl Scene {
    pub fn segments_of(&self, kind: SegmentKind) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter().filter(move |s| s.kind == kind)
    }
}

/// First letter of the first and last word, upper-cased; `?` for a blank name.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first_char = |w: &str| w.chars().next().into_iter().flat_map(char::to_uppercase);
    match words.as_slice() {
        [] => "?".to_string(),
        [only] => first_char(*only).collect(),
        [first, .., last] => first_char(*first).chain(first_char(*last)).collect(),
    }
}

/// Builds everything the map draws for the selected station.
pub fn render_scene(result: &MeetingPointResult, selection: &Selection) -> Scene {
    let display = clamped_display_set(result, selection.station_index);
    let station_index = display.selected_index;
    let station = display.current;
    let station_pos = station.coords();

    if station.journey_times.len() != result.processed_locations.len() {
        warn!(
            station = %station.station_name,
            journeys = station.journey_times.len(),
            locations = result.processed_locations.len(),
            "Journey count does not match location count"
        );
    }

    let mut segments = Vec::new();
    let mut skipped_legs = 0usize;

    for (person_index, journey) in station.journey_times.iter().enumerate() {
        let dimmed = selection.is_dimmed(person_index);
        let boosted = selection.highlighted() == Some(person_index);
        let origin = result
            .processed_locations
            .get(person_index)
            .and_then(|l| l.coords());

        if journey.legs.is_empty() {
            let Some(origin) = origin else {
                continue;
            };
            let mut style = FALLBACK_STYLE;
            if dimmed {
                style = style.dimmed(FALLBACK_DIM_FACTOR);
            } else if boosted {
                style = style.boosted();
            }
            segments.push(PathSegment {
                person_index,
                leg_index: None,
                kind: SegmentKind::Fallback,
                mode: None,
                points: fallback_path(origin, station_pos),
                color: person_color(person_index),
                style,
            });
            continue;
        }

        for (leg_index, leg) in journey.legs.iter().enumerate() {
            let Some(points) = build_leg_path(leg) else {
                skipped_legs += 1;
                continue;
            };
            let mut style = resolve_line_style(&leg.mode);
            if dimmed {
                style = style.dimmed(DIM_FACTOR);
            } else if boosted {
                style = style.boosted();
            }
            segments.push(PathSegment {
                person_index,
                leg_index: Some(leg_index),
                kind: SegmentKind::Routed,
                mode: Some(leg.mode.clone()),
                points,
                color: resolve_color(&leg.mode, leg.line_name.as_deref()),
                style,
            });
        }
    }

    let mut markers: Vec<Marker> = result
        .processed_locations
        .iter()
        .enumerate()
        .filter_map(|(person_index, loc)| {
            let journey = station.journey_times.get(person_index);
            Some(Marker::Origin {
                person_index,
                name: loc.name.clone(),
                initials: initials(&loc.name),
                color: person_color(person_index),
                position: loc.coords()?,
                journey_minutes: journey.map(|j| j.duration_minutes),
                estimated: journey.is_some_and(|j| j.is_estimated()),
            })
        })
        .collect();
    markers.push(Marker::Station {
        name: station.station_name.clone(),
        position: station_pos,
        optimal: display.is_optimal(),
        average_minutes: station.average_journey_time,
        max_minutes: station.max_journey_time,
    });

    let bounds_inputs = collect_bounds_inputs(station, &result.processed_locations);
    let viewport = Bounds::from_points(&bounds_inputs).map(|b| b.padded(VIEWPORT_PADDING));

    debug!(
        station = %station.station_name,
        segments = segments.len(),
        markers = markers.len(),
        skipped_legs,
        "Scene rendered"
    );

    Scene {
        station_index,
        segments,
        markers,
        bounds_inputs,
        viewport,
    }
}
