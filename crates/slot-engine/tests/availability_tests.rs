//! Tests for single-day slot computation.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use slot_engine::{
    calculate_available_slots, AvailabilityInput, AvailableSlot, DstPolicy, Override, SlotError,
    TimeRange, WorkingHourSlot,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

/// 2026-03-16 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn utc(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, h, m, 0).unwrap()
}

fn hours(day_of_week: u8, start: &str, end: &str) -> WorkingHourSlot {
    WorkingHourSlot {
        day_of_week,
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

/// Monday 09:00-17:00 UTC, hour-long slots, no buffer, no notice, "now" long before.
fn base_input() -> AvailabilityInput {
    AvailabilityInput {
        date: monday(),
        timezone: "UTC".to_string(),
        working_hours: vec![hours(1, "09:00", "17:00")],
        overrides: vec![],
        existing_bookings: vec![],
        calendar_busy: vec![],
        duration_mins: 60,
        buffer_mins: 0,
        min_notice_ms: 0,
        now: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
        dst_policy: DstPolicy::default(),
    }
}

fn starts(slots: &[AvailableSlot]) -> Vec<(u32, u32)> {
    use chrono::Timelike;
    slots.iter().map(|s| (s.start.hour(), s.start.minute())).collect()
}

// ── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn plain_working_day_yields_hourly_slots() {
    let slots = calculate_available_slots(&base_input()).unwrap();

    assert_eq!(slots.len(), 8);
    assert_eq!(
        starts(&slots),
        vec![(9, 0), (10, 0), (11, 0), (12, 0), (13, 0), (14, 0), (15, 0), (16, 0)]
    );
    assert_eq!(slots[7].end, utc(17, 0));
}

#[test]
fn booking_removes_exactly_its_slot() {
    let mut input = base_input();
    input.existing_bookings = vec![TimeRange::new(utc(13, 0), utc(14, 0))];

    let slots = calculate_available_slots(&input).unwrap();

    assert_eq!(slots.len(), 7);
    assert_eq!(
        starts(&slots),
        vec![(9, 0), (10, 0), (11, 0), (12, 0), (14, 0), (15, 0), (16, 0)]
    );
}

#[test]
fn unavailable_override_splits_day_and_requantizes_remainder() {
    let mut input = base_input();
    input.overrides = vec![Override::unavailable("12:00", "12:30")];

    let slots = calculate_available_slots(&input).unwrap();

    // 09:00-12:00 gives 3 slots; 12:30-17:00 is cut from its own start.
    assert_eq!(
        starts(&slots),
        vec![(9, 0), (10, 0), (11, 0), (12, 30), (13, 30), (14, 30), (15, 30)]
    );
}

#[test]
fn available_override_opens_a_day_without_working_hours() {
    let mut input = base_input();
    input.working_hours = vec![hours(2, "09:00", "17:00")]; // Tuesday only
    input.overrides = vec![Override::available("10:00", "12:00")];
    input.duration_mins = 30;

    let slots = calculate_available_slots(&input).unwrap();

    assert_eq!(starts(&slots), vec![(10, 0), (10, 30), (11, 0), (11, 30)]);
}

// ── Override interaction ────────────────────────────────────────────────────

#[test]
fn available_override_extends_working_hours() {
    let mut input = base_input();
    input.overrides = vec![Override::available("16:00", "19:00")];

    let slots = calculate_available_slots(&input).unwrap();

    // Coalesced into 09:00-19:00 rather than two separately quantized blocks.
    assert_eq!(slots.len(), 10);
    assert_eq!(slots.last().unwrap().start, utc(18, 0));
}

#[test]
fn unavailable_beats_available_regardless_of_order() {
    let mut input = base_input();
    input.working_hours = vec![];
    input.overrides = vec![
        Override::unavailable("10:00", "11:00"),
        Override::available("09:00", "12:00"),
    ];

    let first = calculate_available_slots(&input).unwrap();
    input.overrides.reverse();
    let second = calculate_available_slots(&input).unwrap();

    assert_eq!(starts(&first), vec![(9, 0), (11, 0)]);
    assert_eq!(first, second);
}

#[test]
fn unavailable_override_covering_the_day_leaves_nothing() {
    let mut input = base_input();
    input.overrides = vec![Override::unavailable("00:00", "24:00")];

    assert!(calculate_available_slots(&input).unwrap().is_empty());
}

#[test]
fn overlapping_unsorted_working_hours_are_normalized() {
    let mut input = base_input();
    input.working_hours = vec![
        hours(1, "13:00", "17:00"),
        hours(1, "09:00", "12:00"),
        hours(1, "11:00", "14:00"),
        hours(3, "06:00", "08:00"),
    ];

    let slots = calculate_available_slots(&input).unwrap();

    assert_eq!(slots, calculate_available_slots(&base_input()).unwrap());
}

// ── Busy time ───────────────────────────────────────────────────────────────

#[test]
fn calendar_busy_is_treated_like_bookings() {
    let mut with_booking = base_input();
    with_booking.existing_bookings = vec![TimeRange::new(utc(10, 15), utc(10, 45))];
    let mut with_calendar = base_input();
    with_calendar.calendar_busy = vec![TimeRange::new(utc(10, 15), utc(10, 45))];

    let a = calculate_available_slots(&with_booking).unwrap();
    let b = calculate_available_slots(&with_calendar).unwrap();

    assert_eq!(a, b);
    // 09:00-10:15 fits one slot; 10:45-17:00 is requantized from 10:45.
    assert_eq!(
        starts(&a),
        vec![(9, 0), (10, 45), (11, 45), (12, 45), (13, 45), (14, 45), (15, 45)]
    );
}

#[test]
fn overlapping_busy_ranges_from_both_sources_merge() {
    let mut input = base_input();
    input.existing_bookings = vec![TimeRange::new(utc(9, 0), utc(11, 0))];
    input.calendar_busy = vec![
        TimeRange::new(utc(10, 30), utc(12, 0)),
        TimeRange::new(utc(12, 0), utc(13, 0)),
    ];

    let slots = calculate_available_slots(&input).unwrap();

    assert_eq!(starts(&slots), vec![(13, 0), (14, 0), (15, 0), (16, 0)]);
}

#[test]
fn busy_ranges_on_other_days_are_inert() {
    let mut input = base_input();
    input.existing_bookings = vec![TimeRange::new(
        Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 15, 17, 0, 0).unwrap(),
    )];
    input.calendar_busy = vec![TimeRange::new(
        Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 18, 0, 0, 0).unwrap(),
    )];

    assert_eq!(calculate_available_slots(&input).unwrap().len(), 8);
}

#[test]
fn busy_range_straddling_opening_time_is_trimmed_to_the_day() {
    let mut input = base_input();
    input.calendar_busy = vec![TimeRange::new(
        Utc.with_ymd_and_hms(2026, 3, 15, 22, 0, 0).unwrap(),
        utc(10, 30),
    )];

    let slots = calculate_available_slots(&input).unwrap();

    assert_eq!(
        starts(&slots),
        vec![(10, 30), (11, 30), (12, 30), (13, 30), (14, 30), (15, 30)]
    );
}

// ── Buffer and notice ───────────────────────────────────────────────────────

#[test]
fn buffer_must_fit_inside_the_same_free_interval() {
    let mut input = base_input();
    input.buffer_mins = 15;

    let slots = calculate_available_slots(&input).unwrap();

    // 16:00-17:00 would push its buffer past closing.
    assert_eq!(slots.len(), 7);
    assert_eq!(slots.last().unwrap().start, utc(15, 0));
}

#[test]
fn buffer_does_not_cross_into_a_following_block() {
    let mut input = base_input();
    input.working_hours = vec![hours(1, "09:00", "10:00"), hours(1, "10:30", "11:30")];
    input.buffer_mins = 10;

    assert!(calculate_available_slots(&input).unwrap().is_empty());
}

#[test]
fn minimum_notice_drops_early_slots() {
    let mut input = base_input();
    input.now = utc(10, 20);
    input.min_notice_ms = 2 * 60 * 60 * 1000;

    let slots = calculate_available_slots(&input).unwrap();

    // Cutoff is 12:20.
    assert_eq!(starts(&slots), vec![(13, 0), (14, 0), (15, 0), (16, 0)]);
}

#[test]
fn slot_starting_exactly_at_notice_cutoff_is_kept() {
    let mut input = base_input();
    input.now = utc(9, 0);
    input.min_notice_ms = 60 * 60 * 1000;

    let slots = calculate_available_slots(&input).unwrap();

    assert_eq!(slots.first().unwrap().start, utc(10, 0));
}

// ── Empty results ───────────────────────────────────────────────────────────

#[test]
fn no_working_hours_and_no_override_is_empty_not_error() {
    let mut input = base_input();
    input.working_hours = vec![hours(0, "09:00", "17:00"), hours(6, "09:00", "17:00")];

    assert_eq!(calculate_available_slots(&input).unwrap(), vec![]);
}

#[test]
fn duration_longer_than_every_interval_is_empty() {
    let mut input = base_input();
    input.duration_mins = 9 * 60;

    assert!(calculate_available_slots(&input).unwrap().is_empty());
}

// ── Timezones ───────────────────────────────────────────────────────────────

#[test]
fn wall_clock_times_resolve_in_host_timezone() {
    let mut input = base_input();
    input.timezone = "Europe/Berlin".to_string(); // CET, UTC+1 in mid-March

    let slots = calculate_available_slots(&input).unwrap();

    assert_eq!(slots.first().unwrap().start, utc(8, 0));
    assert_eq!(slots.last().unwrap().end, utc(16, 0));
}

#[test]
fn dst_change_is_applied_per_date() {
    let mut winter = base_input();
    winter.timezone = "America/New_York".to_string();
    winter.date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(); // Monday, EST
    let mut summer = winter.clone();
    summer.date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(); // Monday, EDT

    let winter_slots = calculate_available_slots(&winter).unwrap();
    let summer_slots = calculate_available_slots(&summer).unwrap();

    assert_eq!(
        winter_slots[0].start,
        Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap()
    );
    assert_eq!(
        summer_slots[0].start,
        Utc.with_ymd_and_hms(2026, 3, 9, 13, 0, 0).unwrap()
    );
}

#[test]
fn working_hours_across_spring_forward_gap() {
    // Sunday 2026-03-08, New York: 02:00 jumps to 03:00.
    let mut input = base_input();
    input.timezone = "America/New_York".to_string();
    input.date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    input.working_hours = vec![hours(0, "01:00", "05:00")];

    let slots = calculate_available_slots(&input).unwrap();

    // Only three real hours elapse between 01:00 EST and 05:00 EDT.
    assert_eq!(slots.len(), 3);
    assert_eq!(
        slots[0].start,
        Utc.with_ymd_and_hms(2026, 3, 8, 6, 0, 0).unwrap()
    );
}

#[test]
fn boundary_in_gap_follows_dst_policy() {
    let mut input = base_input();
    input.timezone = "America/New_York".to_string();
    input.date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    input.working_hours = vec![hours(0, "02:30", "05:00")];

    input.dst_policy = DstPolicy::ShiftForward;
    let shifted = calculate_available_slots(&input).unwrap();
    assert_eq!(
        shifted[0].start,
        Utc.with_ymd_and_hms(2026, 3, 8, 7, 0, 0).unwrap() // 03:00 EDT
    );
    assert_eq!(shifted.len(), 2);

    input.dst_policy = DstPolicy::Skip;
    assert!(calculate_available_slots(&input).unwrap().is_empty());

    input.dst_policy = DstPolicy::Reject;
    assert!(matches!(
        calculate_available_slots(&input),
        Err(SlotError::NonexistentLocalTime { .. })
    ));
}

// ── Errors ──────────────────────────────────────────────────────────────────

#[test]
fn unknown_timezone_is_a_hard_error() {
    let mut input = base_input();
    input.timezone = "Atlantis/Capital".to_string();

    assert_eq!(
        calculate_available_slots(&input),
        Err(SlotError::InvalidTimezone("Atlantis/Capital".to_string()))
    );
}

#[test]
fn zero_duration_is_rejected() {
    let mut input = base_input();
    input.duration_mins = 0;

    assert_eq!(calculate_available_slots(&input), Err(SlotError::InvalidDuration(0)));
}

#[test]
fn malformed_time_is_rejected_even_on_other_weekdays() {
    let mut input = base_input();
    input.working_hours.push(hours(4, "9am", "17:00"));

    assert_eq!(
        calculate_available_slots(&input),
        Err(SlotError::InvalidTimeOfDay("9am".to_string()))
    );
}

#[test]
fn malformed_override_time_is_rejected() {
    let mut input = base_input();
    input.overrides = vec![Override::unavailable("12:00", "12:75")];

    assert_eq!(
        calculate_available_slots(&input),
        Err(SlotError::InvalidTimeOfDay("12:75".to_string()))
    );
}

#[test]
fn inverted_range_is_rejected() {
    let mut input = base_input();
    input.working_hours = vec![hours(1, "17:00", "09:00")];

    assert!(matches!(
        calculate_available_slots(&input),
        Err(SlotError::InvalidTimeRange { .. })
    ));
}

#[test]
fn weekday_out_of_range_is_rejected() {
    let mut input = base_input();
    input.working_hours.push(hours(7, "09:00", "17:00"));

    assert_eq!(calculate_available_slots(&input), Err(SlotError::InvalidWeekday(7)));
}

// ── Representable-range limits ──────────────────────────────────────────────

#[test]
fn block_ending_past_last_representable_date_is_dropped() {
    let mut input = base_input();
    input.date = NaiveDate::MAX;
    input.working_hours = (0..7)
        .flat_map(|day| [hours(day, "09:00", "17:00"), hours(day, "18:00", "24:00")])
        .collect();

    let slots = calculate_available_slots(&input).unwrap();

    // 24:00 would be the following date, which does not exist.
    assert_eq!(slots.len(), 8);
    assert_eq!(slots.last().unwrap().start.date_naive(), NaiveDate::MAX);
}

#[test]
fn huge_duration_near_end_of_time_is_empty_not_panic() {
    let mut input = base_input();
    input.date = NaiveDate::from_ymd_opt(262_000, 1, 1).unwrap();
    input.working_hours = vec![];
    input.overrides = vec![Override::available("09:00", "17:00")];
    input.duration_mins = u32::MAX;

    assert_eq!(calculate_available_slots(&input), Ok(vec![]));
}

// ── Serialization ───────────────────────────────────────────────────────────

#[test]
fn input_deserializes_with_defaults() {
    let json = r#"{
        "date": "2026-03-16",
        "timezone": "UTC",
        "working_hours": [{"day_of_week": 1, "start_time": "09:00", "end_time": "11:00"}],
        "overrides": [{"type": "unavailable", "start_time": "10:00", "end_time": "10:30"}],
        "duration_mins": 30,
        "now": "2026-03-01T00:00:00Z"
    }"#;

    let input: AvailabilityInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.buffer_mins, 0);
    assert_eq!(input.dst_policy, DstPolicy::ShiftForward);

    let slots = calculate_available_slots(&input).unwrap();
    assert_eq!(starts(&slots), vec![(9, 0), (9, 30), (10, 30)]);
}
