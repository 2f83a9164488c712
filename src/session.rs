//! One user's interaction with the service: the current result, the view
//! selection on top of it, and the last error.
//!
//! [`MeetingSession::submit`] takes `&mut self`, so a session never has more
//! than one request in flight. A failed submission leaves the previous result
//! and selection exactly as they were.

use tracing::{info, warn};

use crate::display::{DisplaySet, candidate_count, clamped_display_set};
use crate::error::ClientError;
use crate::input::validate_locations;
use crate::model::{Location, MeetingPointResult};
use crate::render::{Scene, render_scene};
use crate::selection::Selection;
use crate::services::meeting_api::{MeetingPointApi, MeetingPointRequest};

pub struct MeetingSession<A> {
    api: A,
    use_tfl_api: bool,
    result: Option<MeetingPointResult>,
    selection: Selection,
    error: Option<String>,
}

impl<A: MeetingPointApi> MeetingSession<A> {
    pub fn new(api: A, use_tfl_api: bool) -> Self {
        Self {
            api,
            use_tfl_api,
            result: None,
            selection: Selection::default(),
            error: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Validates `locations`, asks the service, and on success replaces the
    /// result and resets the selection.
    ///
    /// Validation failures never reach the network. Any failure is recorded
    /// as [`error`](Self::error) and the previous result stays in place.
    #[tracing::instrument(skip_all, fields(rows = locations.len()))]
    pub async fn submit(
        &mut self,
        locations: &[Location],
    ) -> Result<&MeetingPointResult, ClientError> {
        self.error = None;

        let outcome = match validate_locations(locations) {
            Ok(locations) => {
                let request = MeetingPointRequest {
                    locations,
                    use_tfl_api: self.use_tfl_api,
                };
                self.api.calculate(&request).await
            }
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(result) => {
                info!(
                    optimal = %result.optimal_station.station_name,
                    "New result received"
                );
                self.selection.reset();
                Ok(self.result.insert(result))
            }
            Err(e) => {
                warn!(
                    error = %e,
                    validation = e.is_validation(),
                    kept_previous = self.result.is_some(),
                    "Submission failed"
                );
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Shows a result obtained elsewhere (e.g. a saved file), as if it had
    /// just arrived from the service.
    pub fn load(&mut self, result: MeetingPointResult) {
        self.result = Some(result);
        self.selection.reset();
        self.error = None;
    }

    pub fn result(&self) -> Option<&MeetingPointResult> {
        self.result.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Message of the last failed submission, until dismissed or replaced.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn select_station(&mut self, index: usize) {
        if let Some(result) = &self.result {
            self.selection.select_station(index, candidate_count(result));
        }
    }

    pub fn click_person(&mut self, person_index: usize) {
        let journeys = self.display_set().map(|d| d.current.journey_times.len());
        if journeys.is_some_and(|n| person_index < n) {
            self.selection.click_person(person_index);
        }
    }

    pub fn clear_highlight(&mut self) {
        self.selection.clear();
    }

    pub fn display_set(&self) -> Option<DisplaySet<'_>> {
        let result = self.result.as_ref()?;
        Some(clamped_display_set(result, self.selection.station_index))
    }

    pub fn scene(&self) -> Option<Scene> {
        let result = self.result.as_ref()?;
        Some(render_scene(result, &self.selection))
    }
}
