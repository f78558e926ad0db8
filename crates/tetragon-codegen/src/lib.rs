//! Shared helpers for the tetragon protoc plugin.
//!
//! Finds the event messages of the API (the members of
//! `GetEventsResponse.event`), answers which optional contexts each event
//! carries, and builds the qualified Go references and file preambles the
//! generators stitch their output together with.

pub mod capability;
pub mod config;
pub mod events;
pub mod file;
pub mod ident;

#[cfg(test)]
mod test_support;

pub use capability::{event_field_check, is_parent_event, is_process_event};
pub use config::{Config, Project, SchemaContract};
pub use events::{EventsError, get_events, get_events_with};
pub use file::new_generated_file;
pub use ident::{fmt_errorf, go_ident, logger, tetragon_api_ident, tetragon_ident};

use tetragon_protogen::ProtogenError;
use thiserror::Error as ThisError;

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    EventsError(#[from] EventsError),

    #[error(transparent)]
    ProtogenError(#[from] ProtogenError),
}
