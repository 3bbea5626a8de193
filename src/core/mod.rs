//! Framework-agnostic operations on the elevator log.
//!
//! Nothing in here knows about HTTP; the api layer calls these functions and
//! maps their errors.

/// Training dataset and event timeline
pub mod dataset;
/// Floor calls
pub mod demand;
/// Car state samples
pub mod state;
/// Time windows for listings
pub mod time_range;

pub use dataset::{TimelineEvent, TrainingRecord, event_timeline, training_dataset};
pub use demand::{NewDemand, list_demands, record_demand};
pub use state::{NewState, latest_state, list_states, record_state};
pub use time_range::TimeRange;
