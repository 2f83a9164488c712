pub mod meeting_api;

pub use meeting_api::{
    GeocodedAddress, HealthStatus, MeetingPointApi, MeetingPointRequest, StationInfo,
};
