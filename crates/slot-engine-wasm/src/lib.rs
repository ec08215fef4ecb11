//! WASM bindings for slot-engine.
//!
//! Exposes slot computation and recurrence matching to a JavaScript booking
//! frontend via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Serialize;
use slot_engine::{AvailabilityInput, AvailableSlot, Schedule, TimeRange};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
}

impl From<&AvailableSlot> for SlotDto {
    fn from(s: &AvailableSlot) -> Self {
        Self {
            start: s.start.to_rfc3339(),
            end: s.end.to_rfc3339(),
        }
    }
}

fn to_js_error(prefix: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", prefix, err))
}

fn slots_to_json(slots: &[AvailableSlot]) -> Result<String, JsValue> {
    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    serde_json::to_string(&dtos).map_err(|e| to_js_error("Serialization error", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute one day's bookable slots.
///
/// `input_json` is an availability request object (date, timezone, working
/// hours, overrides, bookings, calendar busy blocks, duration, buffer, minimum
/// notice, now). Returns a JSON array of `{start, end}` objects with RFC 3339
/// strings, or throws a string describing the invalid input.
#[wasm_bindgen(js_name = "calculateAvailableSlots")]
pub fn calculate_available_slots(input_json: &str) -> Result<String, JsValue> {
    let input: AvailabilityInput =
        serde_json::from_str(input_json).map_err(|e| to_js_error("Invalid availability input", e))?;

    let slots = slot_engine::calculate_available_slots(&input)
        .map_err(|e| to_js_error("Unable to compute availability", e))?;

    slots_to_json(&slots)
}

/// Whether `rule` (`FREQ=WEEKLY;BYDAY=..`) fires on `day_of_week` (0 = Sunday).
/// Never throws; malformed rules simply do not match.
#[wasm_bindgen(js_name = "matchesRecurrence")]
pub fn matches_recurrence(rule: &str, day_of_week: u8) -> bool {
    slot_engine::recurrence::matches(rule, day_of_week)
}

/// List the `YYYY-MM-DD` dates between `first` and `last` (inclusive) with at
/// least one bookable slot, as a JSON array of strings.
///
/// `schedule_json` is a stored schedule template; `busy_json` a JSON array of
/// `{start, end}` busy ranges; `now` an RFC 3339 instant.
#[wasm_bindgen(js_name = "bookableDays")]
pub fn bookable_days(
    schedule_json: &str,
    busy_json: &str,
    first: &str,
    last: &str,
    now: &str,
) -> Result<String, JsValue> {
    let schedule: Schedule =
        serde_json::from_str(schedule_json).map_err(|e| to_js_error("Invalid schedule", e))?;
    let busy: Vec<TimeRange> =
        serde_json::from_str(busy_json).map_err(|e| to_js_error("Invalid busy ranges", e))?;
    // Reuse serde's parsing so dates and instants accept exactly what the
    // JSON inputs accept.
    let first = serde_json::from_value(first.into())
        .map_err(|e| to_js_error("Invalid first date", e))?;
    let last = serde_json::from_value(last.into())
        .map_err(|e| to_js_error("Invalid last date", e))?;
    let now = serde_json::from_value(now.into()).map_err(|e| to_js_error("Invalid now", e))?;

    let days = schedule
        .bookable_days(first, last, &busy, now)
        .map_err(|e| to_js_error("Unable to compute availability", e))?;

    serde_json::to_string(&days).map_err(|e| to_js_error("Serialization error", e))
}
