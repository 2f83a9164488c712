//! Output formatting and persistence for meeting-point results.
//!
//! Supports a text summary, a per-person journey CSV (append), a GeoJSON
//! export of the rendered scene, and saving the raw result as JSON.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::{Value, json};
use std::fs::OpenOptions;
use tracing::{debug, info};

use crate::display::clamped_display_set;
use crate::model::{Journey, Leg, MeetingPointResult};
use crate::render::{Marker, Scene};
use crate::selection::Selection;
use crate::style::ModeClass;

/// One row of the journey CSV: a person's trip to the displayed station.
#[derive(Debug, Serialize)]
pub struct JourneyRecord {
    pub timestamp: DateTime<Utc>,
    pub request_id: Option<String>,
    pub station_name: String,
    pub candidate_index: usize,
    pub person: String,
    pub duration_minutes: u32,
    pub walking_minutes: u32,
    pub transfers: u32,
    pub legs: usize,
    pub route_type: String,
    pub estimated: bool,
    pub route: String,
}

/// Short description of one leg, e.g. `Victoria line (4 stops)`.
pub fn describe_leg(leg: &Leg) -> String {
    let base = match (ModeClass::of(&leg.mode), leg.line_name.as_deref()) {
        (ModeClass::Walking, _) => "Walk".to_string(),
        (ModeClass::Bus, Some(line)) => format!("Bus {line}"),
        (_, Some(line)) if !line.trim().is_empty() => line.trim().to_string(),
        _ => leg.mode.clone(),
    };
    match leg.stops {
        Some(stops) if stops > 0 => format!("{base} ({stops} stops, {} min)", leg.duration),
        _ => format!("{base} ({} min)", leg.duration),
    }
}

/// `Walk (5 min) → Victoria (4 stops, 8 min)`; legs without coordinates are
/// still listed.
pub fn describe_route(journey: &Journey) -> String {
    if journey.legs.is_empty() {
        return "direct (no leg details)".to_string();
    }
    journey
        .legs
        .iter()
        .map(describe_leg)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Human-readable lines describing the displayed station and its journeys.
pub fn summary_lines(result: &MeetingPointResult, selection: &Selection) -> Vec<String> {
    let display = clamped_display_set(result, selection.station_index);
    let station = display.current;
    let mut lines = Vec::new();

    let heading = if display.is_optimal() {
        "OPTIMAL LOCATION".to_string()
    } else {
        format!("ALTERNATIVE LOCATION #{}", display.selected_index)
    };
    lines.push(format!("{heading}: {}", station.station_name));
    lines.push(format!(
        "Average journey {} min, longest {} min, fairness {} ({})",
        station.average_journey_time.round(),
        station.max_journey_time.round(),
        station.fairness_score.label(),
        station.fairness_score.description(),
    ));

    for (i, journey) in station.journey_times.iter().enumerate() {
        let marker = match selection.highlighted() {
            Some(h) if h == i => "*",
            _ => " ",
        };
        let mut line = format!(
            "{marker} {}: {} min",
            journey.from_location, journey.duration_minutes
        );
        if journey.total_transfers > 0 {
            let plural = if journey.total_transfers > 1 { "s" } else { "" };
            line.push_str(&format!(", {} change{plural}", journey.total_transfers));
        }
        if journey.total_walking_duration > 0 {
            line.push_str(&format!(", {} min walking", journey.total_walking_duration));
        }
        line.push_str(&format!(" | {}", describe_route(journey)));
        if journey.is_estimated() {
            line.push_str(" [estimated journey, live routing unavailable]");
        }
        lines.push(line);
    }

    for (index, other) in &display.others {
        let label = if *index == 0 {
            "optimal".to_string()
        } else {
            format!("alternative #{index}")
        };
        lines.push(format!(
            "  [{index}] {} ({label}): avg {} min, max {} min, {}",
            other.station_name,
            other.average_journey_time.round(),
            other.max_journey_time.round(),
            other.fairness_score.label(),
        ));
    }

    lines
}

/// Logs the summary of the displayed station.
pub fn print_summary(result: &MeetingPointResult, selection: &Selection) {
    for line in summary_lines(result, selection) {
        info!("{line}");
    }
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One record per journey of the displayed station.
pub fn journey_records(result: &MeetingPointResult, selection: &Selection) -> Vec<JourneyRecord> {
    let display = clamped_display_set(result, selection.station_index);
    let now = Utc::now();
    display
        .current
        .journey_times
        .iter()
        .map(|j| JourneyRecord {
            timestamp: now,
            request_id: result.request_id.clone(),
            station_name: display.current.station_name.clone(),
            candidate_index: display.selected_index,
            person: j.from_location.clone(),
            duration_minutes: j.duration_minutes,
            walking_minutes: j.total_walking_duration,
            transfers: j.total_transfers,
            legs: j.legs.len(),
            route_type: j.route_type.clone(),
            estimated: j.is_estimated(),
            route: describe_route(j),
        })
        .collect()
}

/// Appends records to a CSV file, writing the header only when the file is
/// missing or still empty.
pub fn append_records(path: &str, records: &[JourneyRecord]) -> Result<()> {
    let needs_header = std::fs::metadata(path)
        .map(|m| m.len() == 0)
        .unwrap_or(true);
    debug!(path, needs_header, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

fn coords(points: &[crate::model::LatLng]) -> Vec<[f64; 2]> {
    // GeoJSON positions are [lon, lat]
    points.iter().map(|p| [p.lon, p.lat]).collect()
}

/// The scene as a GeoJSON `FeatureCollection` with a `bbox` for the viewport.
pub fn scene_geojson(scene: &Scene) -> Value {
    let mut features: Vec<Value> = scene
        .segments
        .iter()
        .map(|s| {
            json!({
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": coords(&s.points) },
                "properties": {
                    "kind": s.kind,
                    "person_index": s.person_index,
                    "leg_index": s.leg_index,
                    "mode": s.mode,
                    "color": s.color,
                    "dash_array": s.style.dash,
                    "weight": s.style.weight,
                    "opacity": s.style.opacity,
                }
            })
        })
        .collect();

    features.extend(scene.markers.iter().map(|m| match m {
        Marker::Origin {
            person_index,
            name,
            initials,
            color,
            position,
            journey_minutes,
            estimated,
        } => json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [position.lon, position.lat] },
            "properties": {
                "kind": "origin",
                "person_index": person_index,
                "name": name,
                "initials": initials,
                "color": color,
                "journey_minutes": journey_minutes,
                "estimated": estimated,
            }
        }),
        Marker::Station {
            name,
            position,
            optimal,
            average_minutes,
            max_minutes,
        } => json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [position.lon, position.lat] },
            "properties": {
                "kind": "station",
                "name": name,
                "optimal": optimal,
                "average_minutes": average_minutes,
                "max_minutes": max_minutes,
            }
        }),
    }));

    let mut collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    if let Some(v) = scene.viewport {
        collection["bbox"] = json!([
            v.south_west.lon,
            v.south_west.lat,
            v.north_east.lon,
            v.north_east.lat
        ]);
        let center = v.center();
        collection["center"] = json!([center.lon, center.lat]);
    }
    collection
}

pub fn write_geojson(path: &str, scene: &Scene) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(&scene_geojson(scene))?)?;
    debug!(path, features = scene.segments.len() + scene.markers.len(), "GeoJSON written");
    Ok(())
}

pub fn save_result(path: &str, result: &MeetingPointResult) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(result)?)?;
    Ok(())
}

pub fn load_result(path: &str) -> Result<MeetingPointResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read result file: {path}"))?;
    MeetingPointResult::from_json(&content)
        .with_context(|| format!("Failed to parse result file: {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FairnessRating, LatLng, Location, Station};
    use crate::render::render_scene;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn walk(minutes: u32) -> Leg {
        Leg {
            mode: "walking".into(),
            duration: minutes,
            from_coords: Some(LatLng::new(51.53, -0.13)),
            to_coords: Some(LatLng::new(51.52, -0.13)),
            ..Default::default()
        }
    }

    fn tube(line: &str, stops: u32, minutes: u32) -> Leg {
        Leg {
            mode: "tube".into(),
            line_name: Some(line.into()),
            stops: Some(stops),
            duration: minutes,
            ..Default::default()
        }
    }

    fn sample() -> MeetingPointResult {
        MeetingPointResult {
            request_id: Some("req-1".into()),
            created_at: None,
            optimal_station: Station {
                station_name: "Green Park".into(),
                latitude: 51.5067,
                longitude: -0.1428,
                average_journey_time: 17.4,
                max_journey_time: 21.0,
                fairness_score: FairnessRating::Fair,
                journey_times: vec![
                    Journey {
                        from_location: "Alice".into(),
                        duration_minutes: 14,
                        total_walking_duration: 5,
                        total_transfers: 1,
                        legs: vec![walk(5), tube("Victoria", 4, 9)],
                        ..Default::default()
                    },
                    Journey {
                        from_location: "Bob".into(),
                        duration_minutes: 21,
                        route_type: "estimated".into(),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            alternative_stations: vec![Station {
                station_name: "Bank".into(),
                fairness_score: FairnessRating::Moderate,
                ..Default::default()
            }],
            processed_locations: vec![
                Location::with_coords("Alice", 51.53, -0.13),
                Location::with_coords("Bob", 51.47, -0.2),
            ],
            map_center: LatLng::new(51.5, -0.15),
        }
    }

    #[test]
    fn test_describe_route() {
        let r = sample();
        let alice = &r.optimal_station.journey_times[0];
        assert_eq!(
            describe_route(alice),
            "Walk (5 min) → Victoria (4 stops, 9 min)"
        );
        assert_eq!(
            describe_route(&r.optimal_station.journey_times[1]),
            "direct (no leg details)"
        );
    }

    #[test]
    fn test_summary_flags_estimated() {
        let lines = summary_lines(&sample(), &Selection::default());
        assert!(lines[0].starts_with("OPTIMAL LOCATION: Green Park"));
        assert!(lines[1].contains("Fair (Journey times are well balanced)"));
        assert!(lines[2].contains("1 change,"));
        assert!(!lines[2].contains("estimated"));
        assert!(lines[3].contains("[estimated journey"));
        assert!(lines[4].contains("[1] Bank (alternative #1)"));
    }

    #[test]
    fn test_summary_for_alternative() {
        let selection = Selection {
            station_index: 1,
            ..Default::default()
        };
        let lines = summary_lines(&sample(), &selection);
        assert!(lines[0].starts_with("ALTERNATIVE LOCATION #1: Bank"));
        assert!(lines.last().unwrap().contains("Green Park (optimal)"));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample()).unwrap();
    }

    #[test]
    fn test_append_records_writes_header_once() {
        let path = temp_path("where2meet_test_journeys.csv");
        let _ = fs::remove_file(&path);

        let records = journey_records(&sample(), &Selection::default());
        assert_eq!(records.len(), 2);
        append_records(&path, &records).unwrap();
        append_records(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("timestamp")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 5);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_after_empty_batch_still_writes_header() {
        let path = temp_path("where2meet_test_empty_first.csv");
        let _ = fs::remove_file(&path);

        append_records(&path, &[]).unwrap();
        let records = journey_records(&sample(), &Selection::default());
        append_records(&path, &records[..1]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("timestamp,"));
        assert_eq!(lines.count(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_describe_leg_accepts_walk_alias() {
        let leg = Leg {
            mode: "Walk".into(),
            ..walk(3)
        };
        assert_eq!(describe_leg(&leg), "Walk (3 min)");
    }

    #[test]
    fn test_load_result_error_names_file() {
        let path = temp_path("where2meet_test_missing_result.json");
        let _ = fs::remove_file(&path);
        let err = load_result(&path).unwrap_err();
        assert!(format!("{err}").contains(&path));
    }

    #[test]
    fn test_geojson_shape() {
        let scene = render_scene(&sample(), &Selection::default());
        let doc = scene_geojson(&scene);
        assert_eq!(doc["type"], "FeatureCollection");
        let features = doc["features"].as_array().unwrap();
        // walk leg with coords, tube leg without, Bob's fallback, 2 origins, 1 station
        assert_eq!(features.len(), 5);
        assert_eq!(features[0]["properties"]["kind"], "routed");
        assert_eq!(features[1]["properties"]["kind"], "fallback");
        assert_eq!(features[0]["geometry"]["coordinates"][0][0], -0.13);
        assert!(doc["bbox"].is_array());
        let center = scene.viewport.unwrap().center();
        assert_eq!(doc["center"][0], center.lon);
    }

    #[test]
    fn test_save_and_load_result() {
        let path = temp_path("where2meet_test_result.json");
        save_result(&path, &sample()).unwrap();
        assert_eq!(load_result(&path).unwrap(), sample());
        fs::remove_file(&path).unwrap();
    }
}
