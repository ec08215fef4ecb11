//! # slot-engine
//!
//! Deterministic bookable-slot computation for appointment scheduling.
//!
//! Given a host's weekly working hours, the day's overrides, existing bookings
//! and external calendar busy blocks, the engine produces the ordered list of
//! fixed-length slots a client may book on one date. All wall-clock times are
//! resolved in the host's IANA timezone via `chrono-tz`, so DST transitions are
//! handled by the zone rules rather than by fixed offsets.
//!
//! The engine performs no I/O and keeps no state between calls.
//!
//! ## Modules
//!
//! - [`availability`] — the slot engine itself
//! - [`interval`] — merge/subtract arithmetic on half-open time ranges
//! - [`recurrence`] — `FREQ=WEEKLY;BYDAY=..` rule matching
//! - [`schedule`] — stored templates and per-date input assembly
//! - [`dst`] — wall-clock to instant resolution across DST transitions
//! - [`time_of_day`] — `HH:MM` parsing
//! - [`model`] — input and output types
//! - [`error`] — Error types

pub mod availability;
pub mod dst;
pub mod error;
pub mod interval;
pub mod model;
pub mod recurrence;
pub mod schedule;
pub mod time_of_day;

pub use availability::calculate_available_slots;
pub use dst::DstPolicy;
pub use error::SlotError;
pub use interval::TimeRange;
pub use model::{AvailabilityInput, AvailableSlot, Override, OverrideKind, WorkingHourSlot};
pub use schedule::{applicable_overrides, OverrideRule, Schedule};
pub use time_of_day::TimeOfDay;
