//! Shared database test utilities.

use itin::database::{Database, DatabaseConfig};
use itin::{DateRange, Trip};

use super::date;

/// Creates a temporary test database that will be cleaned up when dropped.
///
/// Returns the database instance. The temporary directory is tied to the
/// database's lifetime through the test.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates a standard test trip: Lisbon, 2026-05-01 through 2026-05-10.
#[allow(dead_code)]
pub fn create_test_trip(db: &mut Database) -> Trip {
    let dates = DateRange::new(date(2026, 5, 1), date(2026, 5, 10)).unwrap();
    db.create_trip("Lisbon", "Portugal", &dates).unwrap()
}
