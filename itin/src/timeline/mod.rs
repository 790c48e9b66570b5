//! Timeline scheduling for trip itineraries.
//!
//! This module implements the scheduling walk that rebuilds a trip's times
//! around a caller-supplied event order, and the default-time suggestion
//! used when adding events to a day. Both are pure functions over event
//! slices; persistence lives in the database layer.

mod reorder;
mod suggest;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use reorder::plan_reorder;
pub use suggest::{suggest_times, SuggestedTimes};
