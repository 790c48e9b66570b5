//! Service operations over trips and events.
//!
//! This layer owns input validation and the mapping from store-level absence
//! (`Ok(None)`, `false`) to [`crate::Error::NotFound`]. Stores stay mechanical;
//! every business rule lives here or in [`crate::timeline`].
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use itin::database::{Database, DatabaseConfig};
//! use itin::operations::{EventDraft, EventOperations, TripOperations};
//! use itin::DateRange;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/itin.db")).unwrap();
//!
//! let dates = DateRange::new(
//!     NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 5, 10).unwrap(),
//! )
//! .unwrap();
//! let trip = TripOperations::create(&mut db, "Lisbon", "Portugal", &dates).unwrap();
//!
//! let day = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
//! let draft = EventDraft::new(trip.id, "Castle of São Jorge").with_times(
//!     day.and_hms_opt(10, 0, 0).unwrap(),
//!     day.and_hms_opt(12, 0, 0).unwrap(),
//! );
//! let event = EventOperations::create(&mut db, &draft).unwrap();
//! assert_eq!(event.trip_id, trip.id);
//! ```

pub mod events;
pub mod init;
pub mod trips;

pub use events::{EventDraft, EventOperations, EventPatch};
pub use init::{init_database, InitOptions, InitResult};
pub use trips::{TripOperations, TripPatch};
