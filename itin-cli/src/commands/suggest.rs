//! Suggest command implementation.
//!
//! This module implements the `suggest` command, which previews the start
//! and end times the library would assign to a new event on a given day.

use clap::Args;
use itin::operations::EventOperations;
use itin::EventCategory;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, parse_date, CategoryArg, GlobalOptions};

/// Suggest start and end times for a new event.
#[derive(Args)]
pub struct SuggestCommand {
    /// Trip id
    #[arg(value_name = "TRIP_ID")]
    trip_id: i64,

    /// Day to schedule on (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date: String,

    /// Event category the suggestion is for
    #[arg(long, value_enum, ignore_case = true)]
    category: Option<CategoryArg>,
}

impl SuggestCommand {
    /// Execute the suggest command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;
        let category = self
            .category
            .map_or(EventCategory::Activity, EventCategory::from);

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let suggested = EventOperations::suggest_defaults(&db, self.trip_id, date, category);

        // Full datetimes: a suggestion can land past midnight when the day's
        // last event runs long.
        println!("Start: {}", suggested.start.format("%Y-%m-%d %H:%M"));
        println!("End: {}", suggested.end.format("%Y-%m-%d %H:%M"));

        Ok(())
    }
}
