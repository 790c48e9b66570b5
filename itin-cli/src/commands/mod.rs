//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `trip`: Create, list, show, update, and delete trips
//! - `event`: Create, list, show, update, delete, restore, and pin events
//! - `suggest`: Suggest start and end times for a new event
//! - `reorder`: Reorder a trip's events and recompute their times
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod event;
pub mod init;
pub mod reorder;
pub mod suggest;
pub mod trip;

pub use completions::CompletionsCommand;
pub use event::EventCommand;
pub use init::InitCommand;
pub use reorder::ReorderCommand;
pub use suggest::SuggestCommand;
pub use trip::TripCommand;
