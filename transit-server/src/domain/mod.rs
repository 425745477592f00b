//! Domain types for the scheduled-trip search engine.
//!
//! This module contains the validated transit data model. All types
//! enforce their invariants at construction time, so code that receives
//! these types can trust their validity.

mod calendar;
mod error;
mod segment;
mod stop;
mod trip;

pub use calendar::ServiceCalendar;
pub use error::DomainError;
pub use segment::{MatchedSegment, StopIndex};
pub use stop::{InvalidStopCode, Stop, StopCode, StopId};
pub use trip::{FareBand, Trip, TripId, TripStop};
