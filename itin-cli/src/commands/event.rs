//! Event command implementation.
//!
//! This module implements the `event` subcommands for creating, listing,
//! showing, updating, deleting, restoring, and pinning itinerary events.
//! When `add` is called without explicit times, start and end are filled
//! from the library's time suggestion for the target day.

use clap::{Args, Subcommand};
use itin::operations::{EventDraft, EventOperations, EventPatch, TripOperations};
use itin::output::{format_json, format_table, format_yaml, Tabular};
use itin::{Event, EventCategory, EventDetails};

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, parse_date, parse_time_on, resolve_format, CategoryArg,
    FormatArg, GlobalOptions,
};

/// Manage itinerary events.
#[derive(Args)]
pub struct EventCommand {
    #[command(subcommand)]
    action: EventAction,
}

/// Event subcommands.
#[derive(Subcommand)]
enum EventAction {
    /// Create a new event, suggesting times when none are given
    Add(EventAddCommand),

    /// List a trip's events in timeline order
    List(EventListCommand),

    /// Show a single event with its details
    Show(EventShowCommand),

    /// Update event fields
    Update(EventUpdateCommand),

    /// Soft-delete an event
    Delete(EventDeleteCommand),

    /// Restore a soft-deleted event
    Restore(EventRestoreCommand),

    /// Toggle an event's pinned flag
    Pin(EventPinCommand),
}

impl EventCommand {
    /// Execute the selected event subcommand.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self.action {
            EventAction::Add(cmd) => cmd.execute(global),
            EventAction::List(cmd) => cmd.execute(global),
            EventAction::Show(cmd) => cmd.execute(global),
            EventAction::Update(cmd) => cmd.execute(global),
            EventAction::Delete(cmd) => cmd.execute(global),
            EventAction::Restore(cmd) => cmd.execute(global),
            EventAction::Pin(cmd) => cmd.execute(global),
        }
    }
}

/// Parse a detail payload against the event's category.
fn parse_details(category: EventCategory, raw: &str) -> Result<EventDetails, CliError> {
    let details = match category {
        EventCategory::Flight => EventDetails::Flight(
            serde_json::from_str(raw)
                .map_err(|e| CliError::InvalidArguments(format!("invalid flight details: {e}")))?,
        ),
        EventCategory::Lodging => EventDetails::Lodging(
            serde_json::from_str(raw)
                .map_err(|e| CliError::InvalidArguments(format!("invalid lodging details: {e}")))?,
        ),
        EventCategory::Transit => EventDetails::Transit(
            serde_json::from_str(raw)
                .map_err(|e| CliError::InvalidArguments(format!("invalid transit details: {e}")))?,
        ),
        EventCategory::Activity | EventCategory::Food => {
            return Err(CliError::InvalidArguments(format!(
                "{category} events do not carry details"
            )))
        }
    };
    Ok(details)
}

/// Create a new event.
#[derive(Args)]
pub struct EventAddCommand {
    /// Owning trip id
    #[arg(value_name = "TRIP_ID")]
    trip_id: i64,

    /// Event title
    #[arg(value_name = "TITLE")]
    title: String,

    /// Day of the event (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date: String,

    /// Event category
    #[arg(long, value_enum, ignore_case = true)]
    category: Option<CategoryArg>,

    /// Start time (HH:MM); when omitted, times are suggested
    #[arg(long, value_name = "HH:MM")]
    start: Option<String>,

    /// End time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    end: Option<String>,

    /// End day when the event crosses midnight (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end_date: Option<String>,

    /// Location text
    #[arg(long, value_name = "TEXT")]
    location: Option<String>,

    /// Latitude
    #[arg(long, value_name = "DEGREES", allow_negative_numbers = true)]
    latitude: Option<f64>,

    /// Longitude
    #[arg(long, value_name = "DEGREES", allow_negative_numbers = true)]
    longitude: Option<f64>,

    /// Keep the start time fixed through reorders
    #[arg(long)]
    pinned: bool,

    /// Free-form notes
    #[arg(long, value_name = "TEXT")]
    notes: Option<String>,

    /// Category-specific details as a JSON object
    #[arg(long, value_name = "JSON")]
    details: Option<String>,
}

impl EventAddCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date(&self.date)?;
        let category = self
            .category
            .map_or(EventCategory::Activity, EventCategory::from);

        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(CliError::InvalidArguments(
                "--latitude and --longitude must be given together".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        // Resolve the trip up front so an unknown id fails as not-found
        // instead of a foreign key violation on insert
        TripOperations::get(&db, self.trip_id).map_err(CliError::from)?;

        let (start, end) = match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                let end_day = match self.end_date {
                    Some(ref raw) => parse_date(raw)?,
                    None => date,
                };
                (parse_time_on(date, start)?, parse_time_on(end_day, end)?)
            }
            (None, None) => {
                let suggested =
                    EventOperations::suggest_defaults(&db, self.trip_id, date, category);
                (suggested.start, suggested.end)
            }
            _ => {
                return Err(CliError::InvalidArguments(
                    "--start and --end must be given together".to_string(),
                ))
            }
        };

        let mut draft = EventDraft::new(self.trip_id, &self.title)
            .with_category(category)
            .with_times(start, end)
            .with_pinned(self.pinned);
        if let Some(location) = self.location {
            draft = draft.with_location(location);
        }
        if let Some(notes) = self.notes {
            draft = draft.with_notes(notes);
        }
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            draft = draft.with_coordinates(latitude, longitude);
        }
        if let Some(ref raw) = self.details {
            draft = draft.with_details(parse_details(category, raw)?);
        }

        let event = EventOperations::create(&mut db, &draft).map_err(CliError::from)?;

        // Output just the event id (shell-friendly) to stdout
        println!("{}", event.id);

        Ok(())
    }
}

/// List a trip's events.
#[derive(Args)]
pub struct EventListCommand {
    /// Trip id
    #[arg(value_name = "TRIP_ID")]
    trip_id: i64,

    /// Only list events on this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date: Option<String>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    format: Option<FormatArg>,
}

impl EventListCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = self.date.as_deref().map(parse_date).transpose()?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let events = match date {
            Some(date) => {
                EventOperations::list_for_day(&db, self.trip_id, date).map_err(CliError::from)?
            }
            None => EventOperations::list(&db, self.trip_id).map_err(CliError::from)?,
        };

        match resolve_format(self.format, &config) {
            FormatArg::Table => println!("{}", format_table(&events)),
            FormatArg::Json => println!("{}", format_json(&events).map_err(CliError::from)?),
            FormatArg::Yaml => print!("{}", format_yaml(&events).map_err(CliError::from)?),
            FormatArg::Csv => format_as_csv(&events)?,
        }

        Ok(())
    }
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format events as CSV on stdout.
fn format_as_csv(events: &[Event]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new().from_writer(handle);

    writer.write_record(Event::headers()).map_err(csv_error)?;

    for event in events {
        writer.write_record(event.row()).map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}

/// Show a single event with its details.
#[derive(Args)]
pub struct EventShowCommand {
    /// Event id
    #[arg(value_name = "EVENT_ID")]
    id: i64,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    format: Option<FormatArg>,
}

impl EventShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let event = EventOperations::get(&db, self.id).map_err(CliError::from)?;

        match resolve_format(self.format, &config) {
            FormatArg::Table => print_event(&event),
            FormatArg::Json => println!("{}", format_json(&event).map_err(CliError::from)?),
            FormatArg::Yaml => print!("{}", format_yaml(&event).map_err(CliError::from)?),
            FormatArg::Csv => {
                return Err(CliError::InvalidArguments(
                    "csv output is only available for event list".to_string(),
                ))
            }
        }

        Ok(())
    }
}

/// Display an event as "Key: value" lines.
fn print_event(event: &Event) {
    println!("Event: {}", event.id);
    println!("Trip: {}", event.trip_id);
    println!("Title: {}", event.title);
    println!("Category: {}", event.category);
    println!("Date: {}", event.event_date);
    if let Some(start) = event.start_time {
        println!("Start: {}", start.format("%Y-%m-%d %H:%M"));
    }
    if let Some(end) = event.end_time {
        println!("End: {}", end.format("%Y-%m-%d %H:%M"));
    }
    println!("Pinned: {}", if event.pinned { "yes" } else { "no" });
    print_if_set("Location", &event.location);
    if let (Some(latitude), Some(longitude)) = (event.latitude, event.longitude) {
        println!("Coordinates: {latitude}, {longitude}");
    }
    print_if_set("Notes", &event.notes);

    if let Some(details) = &event.details {
        print_details(details);
    }
}

fn print_if_set(label: &str, value: &str) {
    if !value.is_empty() {
        println!("{label}: {value}");
    }
}

fn print_details(details: &EventDetails) {
    match details {
        EventDetails::Flight(flight) => {
            print_if_set("Airline", &flight.airline);
            print_if_set("Flight number", &flight.flight_number);
            print_if_set("From", &flight.departure_airport);
            print_if_set("To", &flight.arrival_airport);
            print_if_set("Departure terminal", &flight.departure_terminal);
            print_if_set("Arrival terminal", &flight.arrival_terminal);
            print_if_set("Departure gate", &flight.departure_gate);
            print_if_set("Arrival gate", &flight.arrival_gate);
            print_if_set("Booking reference", &flight.booking_reference);
        }
        EventDetails::Lodging(lodging) => {
            if let Some(check_in) = lodging.check_in {
                println!("Check-in: {}", check_in.format("%Y-%m-%d %H:%M"));
            }
            if let Some(check_out) = lodging.check_out {
                println!("Check-out: {}", check_out.format("%Y-%m-%d %H:%M"));
            }
            print_if_set("Booking reference", &lodging.booking_reference);
        }
        EventDetails::Transit(transit) => {
            print_if_set("Origin", &transit.origin);
            print_if_set("Destination", &transit.destination);
            print_if_set("Mode", &transit.transport_mode);
        }
    }
}

/// Update event fields.
#[derive(Args)]
pub struct EventUpdateCommand {
    /// Event id
    #[arg(value_name = "EVENT_ID")]
    id: i64,

    /// New title
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// New category
    #[arg(long, value_enum, ignore_case = true)]
    category: Option<CategoryArg>,

    /// Day the new times fall on (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date: Option<String>,

    /// New start time (HH:MM); moves the event to the day given by --date
    #[arg(long, value_name = "HH:MM")]
    start: Option<String>,

    /// New end time (HH:MM)
    #[arg(long, value_name = "HH:MM")]
    end: Option<String>,

    /// End day when the event crosses midnight (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    end_date: Option<String>,

    /// New location text
    #[arg(long, value_name = "TEXT")]
    location: Option<String>,

    /// New latitude
    #[arg(long, value_name = "DEGREES", allow_negative_numbers = true)]
    latitude: Option<f64>,

    /// New longitude
    #[arg(long, value_name = "DEGREES", allow_negative_numbers = true)]
    longitude: Option<f64>,

    /// New pinned flag
    #[arg(long, value_name = "BOOL")]
    pinned: Option<bool>,

    /// New notes
    #[arg(long, value_name = "TEXT")]
    notes: Option<String>,

    /// New category-specific details as a JSON object
    #[arg(long, value_name = "JSON")]
    details: Option<String>,
}

impl EventUpdateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(CliError::InvalidArguments(
                "--latitude and --longitude must be given together".to_string(),
            ));
        }

        let mut patch = EventPatch::new();
        patch.title = self.title;
        patch.category = self.category.map(EventCategory::from);
        patch.location = self.location;
        patch.pinned = self.pinned;
        patch.notes = self.notes;
        if let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) {
            patch.latitude = Some(latitude);
            patch.longitude = Some(longitude);
        }

        if self.start.is_some() || self.end.is_some() {
            let Some(ref raw_date) = self.date else {
                return Err(CliError::InvalidArguments(
                    "--start and --end require --date".to_string(),
                ));
            };
            let date = parse_date(raw_date)?;
            if let Some(ref start) = self.start {
                patch.start_time = Some(parse_time_on(date, start)?);
            }
            if let Some(ref end) = self.end {
                let end_day = match self.end_date {
                    Some(ref raw) => parse_date(raw)?,
                    None => date,
                };
                patch.end_time = Some(parse_time_on(end_day, end)?);
            }
        }

        if patch.title.is_none()
            && patch.category.is_none()
            && patch.location.is_none()
            && patch.latitude.is_none()
            && patch.start_time.is_none()
            && patch.end_time.is_none()
            && patch.pinned.is_none()
            && patch.notes.is_none()
            && self.details.is_none()
        {
            return Err(CliError::InvalidArguments(
                "nothing to update (pass at least one field flag)".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        // A detail payload is parsed against the patched category, or the
        // stored one when the category is not changing.
        if let Some(ref raw) = self.details {
            let category = match patch.category {
                Some(category) => category,
                None => EventOperations::get(&db, self.id).map_err(CliError::from)?.category,
            };
            patch.details = Some(parse_details(category, raw)?);
        }

        let event = EventOperations::update(&mut db, self.id, &patch).map_err(CliError::from)?;

        if !global.quiet {
            println!("Updated event {}: {}", event.id, event.title);
        }

        Ok(())
    }
}

/// Soft-delete an event.
#[derive(Args)]
pub struct EventDeleteCommand {
    /// Event id
    #[arg(value_name = "EVENT_ID")]
    id: i64,
}

impl EventDeleteCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        EventOperations::delete(&mut db, self.id).map_err(CliError::from)?;

        if !global.quiet {
            println!(
                "Deleted event {} (restore with: itin event restore {})",
                self.id, self.id
            );
        }

        Ok(())
    }
}

/// Restore a soft-deleted event.
#[derive(Args)]
pub struct EventRestoreCommand {
    /// Event id
    #[arg(value_name = "EVENT_ID")]
    id: i64,
}

impl EventRestoreCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let event = EventOperations::restore(&mut db, self.id).map_err(CliError::from)?;

        if !global.quiet {
            println!("Restored event {}: {}", event.id, event.title);
        }

        Ok(())
    }
}

/// Toggle an event's pinned flag.
#[derive(Args)]
pub struct EventPinCommand {
    /// Event id
    #[arg(value_name = "EVENT_ID")]
    id: i64,
}

impl EventPinCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let event = EventOperations::toggle_pin(&mut db, self.id).map_err(CliError::from)?;

        if !global.quiet {
            if event.pinned {
                println!("Pinned event {}: {}", event.id, event.title);
            } else {
                println!("Unpinned event {}: {}", event.id, event.title);
            }
        }

        Ok(())
    }
}
