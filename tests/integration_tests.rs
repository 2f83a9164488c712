use where2meet::display::{candidate_count, derive_display_set};
use where2meet::model::{FairnessRating, LatLng, MeetingPointResult};
use where2meet::path::build_leg_path;
use where2meet::render::{Marker, SegmentKind, render_scene};
use where2meet::selection::{Highlight, Selection};
use where2meet::style::{BUS_COLOR, FALLBACK_STYLE, resolve_color};

fn fixture() -> MeetingPointResult {
    let json = include_str!("fixtures/meeting_result.json");
    MeetingPointResult::from_json(json).expect("Failed to parse fixture")
}

#[test]
fn test_fixture_parses() {
    let result = fixture();
    assert_eq!(result.optimal_station.fairness_score, FairnessRating::VeryFair);
    assert_eq!(result.alternative_stations.len(), 4);
    assert_eq!(
        result.optimal_station.journey_times.len(),
        result.processed_locations.len()
    );
    assert!(result.optimal_station.journey_times[1].is_estimated());
}

#[test]
fn test_display_set_caps_and_preserves_rank() {
    let result = fixture();
    assert_eq!(candidate_count(&result), 4);

    for index in 0..4 {
        let set = derive_display_set(&result, index).unwrap();
        assert_eq!(set.others.len(), 3);
        assert!(set.others.iter().all(|(_, s)| !std::ptr::eq(*s, set.current)));
    }
    let last = derive_display_set(&result, 3).unwrap();
    assert_eq!(last.current.station_name, "Victoria");
    assert!(derive_display_set(&result, 4).is_none());
}

#[test]
fn test_end_to_end_scene() {
    let result = fixture();
    let scene = render_scene(&result, &Selection::default());

    let routed: Vec<_> = scene.segments_of(SegmentKind::Routed).collect();
    let fallback: Vec<_> = scene.segments_of(SegmentKind::Fallback).collect();
    assert_eq!(routed.len(), 2);
    assert_eq!(fallback.len(), 1);
    assert_eq!(fallback[0].person_index, 1);
    assert_eq!(fallback[0].style, FALLBACK_STYLE);
    assert_eq!(
        fallback[0].points,
        vec![LatLng::new(51.47, -0.2), LatLng::new(51.5067, -0.1428)]
    );

    // tube leg keeps its intermediate stops
    assert_eq!(routed[1].points.len(), 4);
    assert_eq!(routed[1].color, resolve_color("tube", Some("Victoria")));

    let origins = scene
        .markers
        .iter()
        .filter(|m| matches!(m, Marker::Origin { .. }))
        .count();
    let stations = scene
        .markers
        .iter()
        .filter(|m| matches!(m, Marker::Station { optimal: true, .. }))
        .count();
    assert_eq!(origins, 2);
    assert_eq!(stations, 1);

    for point in [
        LatLng::new(51.5067, -0.1428),
        LatLng::new(51.5290, -0.1310),
        LatLng::new(51.4700, -0.2000),
        LatLng::new(51.5282, -0.1337),
    ] {
        assert!(scene.bounds_inputs.contains(&point), "missing {point:?}");
    }
    let viewport = scene.viewport.unwrap();
    assert!(scene.bounds_inputs.iter().all(|p| viewport.contains(*p)));
}

#[test]
fn test_switching_station_rebuilds_scene_and_drops_highlight() {
    let result = fixture();
    let mut selection = Selection::default();
    selection.click_person(1);
    assert_eq!(selection.highlight, Highlight::Highlighted(1));

    selection.select_station(1, candidate_count(&result));
    assert_eq!(selection.highlight, Highlight::Idle);

    let scene = render_scene(&result, &selection);
    let routed: Vec<_> = scene.segments_of(SegmentKind::Routed).collect();
    assert_eq!(routed.len(), 1);
    assert_eq!(routed[0].color, BUS_COLOR);
    assert_eq!(scene.segments_of(SegmentKind::Fallback).count(), 1);
    assert!(scene.bounds_inputs.contains(&LatLng::new(51.5152, -0.1415)));
    assert!(!scene.bounds_inputs.contains(&LatLng::new(51.5067, -0.1428)));
}

#[test]
fn test_leg_missing_coordinates_is_skipped() {
    let mut result = fixture();
    result.optimal_station.journey_times[0].legs[0].to_coords = None;
    assert!(build_leg_path(&result.optimal_station.journey_times[0].legs[0]).is_none());

    let scene = render_scene(&result, &Selection::default());
    assert_eq!(scene.segments_of(SegmentKind::Routed).count(), 1);
    assert_eq!(scene.segments_of(SegmentKind::Fallback).count(), 1);
}

#[test]
fn test_highlight_dims_other_people() {
    let result = fixture();
    let mut selection = Selection::default();
    selection.click_person(0);

    let scene = render_scene(&result, &selection);
    for segment in &scene.segments {
        if segment.person_index == 0 {
            assert_eq!(segment.style.opacity, 1.0);
        } else {
            assert!(segment.style.opacity < FALLBACK_STYLE.opacity);
        }
    }
}
