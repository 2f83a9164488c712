//! Bounded, indexable view of the candidate stations in a result.
//!
//! Candidate index 0 is always the optimal station; indices `1..=K` are the
//! first `K` alternatives in the order the service ranked them.

use crate::model::{MeetingPointResult, Station};

/// How many alternatives are offered next to the optimal station.
pub const MAX_ALTERNATIVES: usize = 3;

/// The station currently shown plus the ones the user can switch to.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySet<'a> {
    pub selected_index: usize,
    pub current: &'a Station,
    /// Remaining candidates with their candidate index, order preserved.
    pub others: Vec<(usize, &'a Station)>,
}

impl DisplaySet<'_> {
    pub fn is_optimal(&self) -> bool {
        self.selected_index == 0
    }
}

/// `[optimal, alternatives[..K]]`.
pub fn candidates(result: &MeetingPointResult) -> Vec<&Station> {
    std::iter::once(&result.optimal_station)
        .chain(result.alternative_stations.iter().take(MAX_ALTERNATIVES))
        .collect()
}

pub fn candidate_count(result: &MeetingPointResult) -> usize {
    1 + result.alternative_stations.len().min(MAX_ALTERNATIVES)
}

/// Falls back to the optimal station when `index` is outside the display set.
pub fn clamp_station_index(result: &MeetingPointResult, index: usize) -> usize {
    if index < candidate_count(result) { index } else { 0 }
}

/// Splits the candidates into the selected one and the rest.
///
/// Returns `None` when `selected_index` does not name a candidate; callers
/// clamp with [`clamp_station_index`] first, or use [`clamped_display_set`].
pub fn derive_display_set(
    result: &MeetingPointResult,
    selected_index: usize,
) -> Option<DisplaySet<'_>> {
    let all = candidates(result);
    if selected_index >= all.len() {
        return None;
    }
    Some(split(all, selected_index))
}

/// Like [`derive_display_set`], but an out-of-range index shows the optimal
/// station.
pub fn clamped_display_set(result: &MeetingPointResult, selected_index: usize) -> DisplaySet<'_> {
    split(candidates(result), clamp_station_index(result, selected_index))
}

fn split(all: Vec<&Station>, selected_index: usize) -> DisplaySet<'_> {
    let current = all[selected_index];
    let others = all
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i != selected_index)
        .collect();

    DisplaySet {
        selected_index,
        current,
        others,
    }
}
