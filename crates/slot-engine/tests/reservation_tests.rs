//! Tests for the at-most-once reservation book.

use chrono::NaiveDate;
use slot_engine::error::SlotError;
use slot_engine::reservation::{Reservation, ReservationBook};
use slot_engine::slots::compute_available_slots;
use slot_engine::{ClockTime, WorkingHoursTemplate};

fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn reservation(provider: &str, start: &str, duration_minutes: u32) -> Reservation {
    Reservation {
        provider_id: provider.to_string(),
        date: date(),
        start_time: t(start),
        duration_minutes,
    }
}

#[test]
fn second_booker_of_same_slot_gets_conflict() {
    let mut book = ReservationBook::new();
    book.reserve(&reservation("dr-lee", "10:00", 30)).unwrap();

    let err = book.reserve(&reservation("dr-lee", "10:00", 30)).unwrap_err();
    assert!(matches!(err, SlotError::Conflict(_)), "got {err:?}");
    assert_eq!(book.len(), 1);
}

#[test]
fn partial_overlap_is_a_conflict_but_adjacency_is_not() {
    let mut book = ReservationBook::new();
    book.reserve(&reservation("dr-lee", "10:00", 60)).unwrap();

    assert!(book.reserve(&reservation("dr-lee", "10:30", 30)).is_err());
    assert!(book.reserve(&reservation("dr-lee", "11:00", 30)).is_ok());
    assert!(book.reserve(&reservation("dr-lee", "09:30", 30)).is_ok());
}

#[test]
fn providers_and_dates_are_independent() {
    let mut book = ReservationBook::new();
    book.reserve(&reservation("dr-lee", "10:00", 30)).unwrap();
    book.reserve(&reservation("dr-patel", "10:00", 30)).unwrap();

    let mut next_day = reservation("dr-lee", "10:00", 30);
    next_day.date = date().succ_opt().unwrap();
    book.reserve(&next_day).unwrap();

    assert_eq!(book.len(), 3);
}

#[test]
fn rejected_reservation_leaves_book_empty() {
    let mut book = ReservationBook::new();
    assert!(matches!(
        book.reserve(&reservation("dr-lee", "10:00", 0)),
        Err(SlotError::InvalidDuration(0))
    ));
    assert!(book.is_empty());
}

#[test]
fn release_frees_the_slot() {
    let mut book = ReservationBook::new();
    let r = reservation("dr-lee", "10:00", 30);
    book.reserve(&r).unwrap();

    assert!(book.release(&r));
    assert!(!book.release(&r), "second release finds nothing");
    assert!(book.is_empty());
    book.reserve(&r).unwrap();
}

#[test]
fn booked_snapshot_feeds_back_into_slot_calculation() {
    let mut book = ReservationBook::new();
    book.reserve(&reservation("dr-lee", "11:00", 30)).unwrap();
    book.reserve(&reservation("dr-lee", "09:00", 30)).unwrap();

    let snapshot = book.bookings_for("dr-lee", date());
    assert_eq!(snapshot[0].start_time, t("09:00"));
    assert_eq!(snapshot[1].start_time, t("11:00"));

    let tpl = WorkingHoursTemplate::new(1, t("09:00"), t("12:00"));
    let slots = compute_available_slots(&tpl, &snapshot, true, 30, 30).unwrap();
    let shown: Vec<String> = slots.iter().map(ToString::to_string).collect();
    assert_eq!(shown, vec!["09:30", "10:00", "10:30", "11:30"]);
}
