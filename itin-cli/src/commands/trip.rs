//! Trip command implementation.
//!
//! This module implements the `trip` subcommands for creating, listing,
//! showing, updating, and deleting trips.

use clap::{Args, Subcommand};
use itin::operations::{EventOperations, TripOperations, TripPatch};
use itin::output::{format_json, format_table, format_yaml};
use itin::{Database, DateRange};

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_date, resolve_format, FormatArg, GlobalOptions,
};

/// Manage trips.
#[derive(Args)]
pub struct TripCommand {
    #[command(subcommand)]
    action: TripAction,
}

/// Trip subcommands.
#[derive(Subcommand)]
enum TripAction {
    /// Create a new trip
    Add(TripAddCommand),

    /// List all trips
    List(TripListCommand),

    /// Show a single trip with its event summary
    Show(TripShowCommand),

    /// Update trip fields
    Update(TripUpdateCommand),

    /// Delete a trip and all of its events
    Delete(TripDeleteCommand),
}

impl TripCommand {
    /// Execute the selected trip subcommand.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            TripAction::Add(cmd) => cmd.execute(global),
            TripAction::List(cmd) => cmd.execute(global),
            TripAction::Show(cmd) => cmd.execute(global),
            TripAction::Update(cmd) => cmd.execute(global),
            TripAction::Delete(cmd) => cmd.execute(global),
        }
    }
}

/// Create a new trip.
#[derive(Args)]
pub struct TripAddCommand {
    /// Trip name
    #[arg(value_name = "NAME")]
    name: String,

    /// Destination
    #[arg(value_name = "DESTINATION")]
    destination: String,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: String,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end: String,
}

impl TripAddCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let start = parse_date(&self.start)?;
        let end = parse_date(&self.end)?;
        let dates = DateRange::new(start, end).map_err(CliError::from)?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let trip = TripOperations::create(&mut db, &self.name, &self.destination, &dates)
            .map_err(CliError::from)?;

        // Output just the trip id (shell-friendly) to stdout
        println!("{}", trip.id);

        Ok(())
    }
}

/// List all trips.
#[derive(Args)]
pub struct TripListCommand {
    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    format: Option<FormatArg>,
}

impl TripListCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let trips = TripOperations::list(&db).map_err(CliError::from)?;

        match resolve_format(self.format, &config) {
            FormatArg::Table => println!("{}", format_table(&trips)),
            FormatArg::Json => println!("{}", format_json(&trips).map_err(CliError::from)?),
            FormatArg::Yaml => print!("{}", format_yaml(&trips).map_err(CliError::from)?),
            FormatArg::Csv => {
                return Err(CliError::InvalidArguments(
                    "csv output is only available for event list".to_string(),
                ))
            }
        }

        Ok(())
    }
}

/// Show a single trip with its event summary.
#[derive(Args)]
pub struct TripShowCommand {
    /// Trip id
    #[arg(value_name = "TRIP_ID")]
    id: i64,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    format: Option<FormatArg>,
}

impl TripShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let trip = TripOperations::get(&db, self.id).map_err(CliError::from)?;
        let event_count = EventOperations::count_for_trip(&db, trip.id).map_err(CliError::from)?;
        let last_event =
            Database::last_event_by_trip(db.connection(), trip.id).map_err(CliError::from)?;

        match resolve_format(self.format, &config) {
            FormatArg::Table => {
                let days = trip
                    .dates
                    .end()
                    .signed_duration_since(trip.dates.start())
                    .num_days()
                    + 1;

                println!("Trip: {}", trip.id);
                println!("Name: {}", trip.name);
                println!("Destination: {}", trip.destination);
                println!("Dates: {} to {}", trip.dates.start(), trip.dates.end());
                println!("Days: {days}");
                println!("Events: {event_count}");
                if let Some(event) = last_event {
                    println!("Last event: {} on {}", event.title, event.event_date);
                }
            }
            FormatArg::Json => println!("{}", format_json(&trip).map_err(CliError::from)?),
            FormatArg::Yaml => print!("{}", format_yaml(&trip).map_err(CliError::from)?),
            FormatArg::Csv => {
                return Err(CliError::InvalidArguments(
                    "csv output is only available for event list".to_string(),
                ))
            }
        }

        Ok(())
    }
}

/// Update trip fields.
#[derive(Args)]
pub struct TripUpdateCommand {
    /// Trip id
    #[arg(value_name = "TRIP_ID")]
    id: i64,

    /// New trip name
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// New destination
    #[arg(long, value_name = "DESTINATION")]
    destination: Option<String>,

    /// New first day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    start: Option<String>,

    /// New last day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end: Option<String>,
}

impl TripUpdateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut patch = TripPatch::new();
        patch.name = self.name;
        patch.destination = self.destination;
        if let Some(ref start) = self.start {
            patch.start_date = Some(parse_date(start)?);
        }
        if let Some(ref end) = self.end {
            patch.end_date = Some(parse_date(end)?);
        }

        if patch.name.is_none()
            && patch.destination.is_none()
            && patch.start_date.is_none()
            && patch.end_date.is_none()
        {
            return Err(CliError::InvalidArguments(
                "nothing to update (pass at least one of --name, --destination, --start, --end)"
                    .to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let trip = TripOperations::update(&mut db, self.id, &patch).map_err(CliError::from)?;

        if !global.quiet {
            println!(
                "Updated trip {}: {} ({} to {})",
                trip.id,
                trip.name,
                trip.dates.start(),
                trip.dates.end()
            );
        }

        Ok(())
    }
}

/// Delete a trip and all of its events.
#[derive(Args)]
pub struct TripDeleteCommand {
    /// Trip id
    #[arg(value_name = "TRIP_ID")]
    id: i64,
}

impl TripDeleteCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        TripOperations::delete(&mut db, self.id).map_err(CliError::from)?;

        if !global.quiet {
            println!("Deleted trip {}", self.id);
        }

        Ok(())
    }
}
