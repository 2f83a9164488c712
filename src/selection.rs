//! User-driven view state: which candidate station is shown and which
//! commuter, if any, is highlighted.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Idle,
    Highlighted(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub station_index: usize,
    pub highlight: Highlight,
}

impl Selection {
    /// Toggles the highlight on `person_index`. Clicking another person moves
    /// the highlight; clicking the highlighted one clears it.
    pub fn click_person(&mut self, person_index: usize) {
        self.highlight = match self.highlight {
            Highlight::Highlighted(i) if i == person_index => Highlight::Idle,
            _ => Highlight::Highlighted(person_index),
        };
        debug!(person_index, highlight = ?self.highlight, "Person clicked");
    }

    pub fn clear(&mut self) {
        self.highlight = Highlight::Idle;
    }

    /// Shows candidate `index`. Out-of-range clicks are ignored. Any highlight
    /// is dropped because journeys are re-associated with the new station.
    pub fn select_station(&mut self, index: usize, candidate_count: usize) {
        if index >= candidate_count {
            debug!(index, candidate_count, "Ignoring out-of-range station click");
            return;
        }
        self.station_index = index;
        self.highlight = Highlight::Idle;
    }

    /// State for a freshly received result.
    pub fn reset(&mut self) {
        *self = Selection::default();
    }

    pub fn highlighted(&self) -> Option<usize> {
        match self.highlight {
            Highlight::Highlighted(i) => Some(i),
            Highlight::Idle => None,
        }
    }

    /// `true` when `person_index` should be drawn faded.
    pub fn is_dimmed(&self, person_index: usize) -> bool {
        matches!(self.highlight, Highlight::Highlighted(i) if i != person_index)
    }
}
