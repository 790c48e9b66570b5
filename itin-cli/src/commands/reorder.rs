//! Reorder command implementation.
//!
//! This module implements the `reorder` command, which rewrites a trip's
//! whole timeline to the given event order and recomputes start and end
//! times, keeping pinned events at their scheduled starts.

use clap::Args;
use itin::operations::EventOperations;
use itin::output::format_table;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Reorder a trip's events and recompute their times.
#[derive(Args)]
pub struct ReorderCommand {
    /// Trip id
    #[arg(value_name = "TRIP_ID")]
    trip_id: i64,

    /// Every live event id of the trip, in the desired timeline order
    #[arg(value_name = "EVENT_ID", required = true, num_args = 1..)]
    event_ids: Vec<i64>,
}

impl ReorderCommand {
    /// Execute the reorder command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let events = EventOperations::reorder(&mut db, self.trip_id, &self.event_ids)
            .map_err(CliError::from)?;

        // Show the recomputed timeline
        if !global.quiet {
            println!("{}", format_table(&events));
        }

        Ok(())
    }
}
