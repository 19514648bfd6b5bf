//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Request Model
//! - An `EventRequest` carries an opaque payload plus ordered `RoutingIntent`s
//! - A strategy selects the subset of intents that get dispatched
//! - Each request is identified by a `Uuid` generated at the front of the pipeline

mod blueprint;
mod destination;
mod error;
mod event;
mod outcome;
mod registry;

pub use blueprint::*;
pub use destination::*;
pub use error::*;
pub use event::*;
pub use outcome::*;
pub use registry::{AuditSink, DestinationRegistry};
