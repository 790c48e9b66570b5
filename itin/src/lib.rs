#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # itin
//!
//! A library for managing trip itineraries and timeline scheduling.
//!
//! A trip owns a sequence of dated events (flights, lodging stays,
//! activities, meals, transit legs). The library persists trips, events,
//! and category-specific detail records in SQLite, suggests default times
//! for new events, and reschedules whole days around pinned events.
//!
//! ## Core Types
//!
//! - [`Trip`] and [`DateRange`]: The owning aggregate and its inclusive
//!   date span
//! - [`Event`], [`EventCategory`], and [`EventDetails`]: Itinerary entries
//!   and their category-specific payloads
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use itin::{DateRange, EventCategory};
//!
//! // An inclusive trip date range
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
//! )
//! .unwrap();
//! assert!(range.contains(NaiveDate::from_ymd_opt(2026, 5, 3).unwrap()));
//!
//! // Categories parse from their lowercase names
//! let category: EventCategory = "flight".parse().unwrap();
//! assert!(category.has_details());
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod event;
pub mod logging;
pub mod operations;
pub mod output;
pub mod timeline;
pub mod trip;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use event::{
    Event, EventCategory, EventDetails, FlightDetails, LodgingDetails, TransitDetails,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    init_database, EventDraft, EventOperations, EventPatch, InitOptions, InitResult,
    TripOperations, TripPatch,
};
pub use timeline::SuggestedTimes;
pub use trip::{DateEventCount, DateRange, Trip};
